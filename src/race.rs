//! Race coordination: query every provider at once, keep the first
//! success, give up at the deadline.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cep::Cep;
use crate::config::RaceConfig;
use crate::provider::{Provider, ProviderError, ProviderResult};

/// What a race hands back. Exactly one per [`Race::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum RaceOutcome {
    Success(ProviderResult),
    Timeout,
    /// Every provider failed. Only produced with `fail_fast` enabled.
    Exhausted,
}

pub struct Race {
    providers: Vec<Arc<dyn Provider>>,
    config: RaceConfig,
}

impl Race {
    pub fn new(providers: Vec<Arc<dyn Provider>>, config: RaceConfig) -> Self {
        Self { providers, config }
    }

    /// Start one task per provider and wait for the first success or the
    /// deadline. Losing tasks are detached, not aborted; each lookup is
    /// still bounded by `request_timeout`.
    pub async fn run(&self, cep: &Cep) -> RaceOutcome {
        // One slot per provider: a late winner's send always has room.
        let (tx, mut rx) = mpsc::channel(self.providers.len().max(1));

        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let tx = tx.clone();
            let cep = cep.clone();
            let request_timeout = self.config.request_timeout;

            tokio::spawn(async move {
                let id = provider.id();

                // The artificial delay is not part of the request.
                let delay = provider.delay();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                let started = Instant::now();
                let result = match tokio::time::timeout(request_timeout, provider.lookup(&cep)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Transport(format!(
                        "request timed out after {request_timeout:?}"
                    ))),
                };

                match result {
                    Ok(result) => {
                        debug!(provider = %id, elapsed = ?started.elapsed(), "provider answered");
                        // Fails only when the race is already over.
                        let _ = tx.try_send(result);
                    }
                    Err(error) => {
                        warn!(provider = %id, %error, "could not get results from provider");
                    }
                }
            });
        }

        // Only the tasks hold senders now, so `recv` yields `None` once
        // all of them have finished without a success.
        drop(tx);

        let deadline = tokio::time::sleep(self.config.timeout);
        tokio::pin!(deadline);

        let outcome = tokio::select! {
            received = rx.recv() => match received {
                Some(result) => RaceOutcome::Success(result),
                None if self.config.fail_fast => RaceOutcome::Exhausted,
                None => {
                    (&mut deadline).await;
                    RaceOutcome::Timeout
                }
            },
            _ = &mut deadline => RaceOutcome::Timeout,
        };

        match &outcome {
            RaceOutcome::Success(result) => info!(provider = %result.provider, "race won"),
            RaceOutcome::Timeout => info!(timeout = ?self.config.timeout, "race timed out"),
            RaceOutcome::Exhausted => info!("every provider failed"),
        }

        outcome
    }
}
