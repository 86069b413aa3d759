use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Address, Provider, ProviderError, ProviderId, ProviderResult};
use crate::cep::Cep;

/// A scripted provider for tests. Waits `latency`, then returns the
/// configured reply. Counts calls and calls that ran to the end.
pub struct MockProvider {
    id: ProviderId,
    latency: Duration,
    reply: Result<Address, ProviderError>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl MockProvider {
    pub fn new(id: ProviderId, reply: Result<Address, ProviderError>) -> Self {
        Self {
            id,
            latency: Duration::ZERO,
            reply,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn succeeding(id: ProviderId, address: Address) -> Self {
        Self::new(id, Ok(address))
    }

    pub fn failing(id: ProviderId, error: ProviderError) -> Self {
        Self::new(id, Err(error))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn lookup(&self, _cep: &Cep) -> Result<ProviderResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map(|address| ProviderResult {
            provider: self.id,
            address,
        })
    }
}
