pub mod apicep;
pub mod mock;
pub mod viacep;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::cep::Cep;
use crate::config::Config;

pub use apicep::{ApiCepAddress, ApiCepProvider};
pub use viacep::{ViaCepAddress, ViaCepProvider};

/// The lookup services a race can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    ApiCep,
    ViaCep,
}

impl ProviderId {
    pub fn name(self) -> &'static str {
        match self {
            ProviderId::ApiCep => "apicep",
            ProviderId::ViaCep => "viacep",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a single provider call produced nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("client error - status: {status} - body - '{body}'")]
    Client { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),
}

/// Provider-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Address {
    ApiCep(ApiCepAddress),
    ViaCep(ViaCepAddress),
}

impl Address {
    /// The payload as ordered `(field, value)` pairs.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Address::ApiCep(a) => a.fields(),
            Address::ViaCep(a) => a.fields(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.fields().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

/// A successfully parsed response, tagged with who answered.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    pub provider: ProviderId,
    pub address: Address,
}

/// One external lookup service. Implementations make a single call
/// per `lookup`: no retries, no caching.
#[async_trait]
pub trait Provider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Artificial wait the race applies before calling `lookup`. It is not
    /// counted against the request timeout.
    fn delay(&self) -> Duration {
        Duration::ZERO
    }

    async fn lookup(&self, cep: &Cep) -> Result<ProviderResult, ProviderError>;
}

/// Reports a fixed delay and delegates the lookup. Used to simulate a
/// slow provider.
pub struct Delayed {
    inner: Arc<dyn Provider>,
    delay: Duration,
}

impl Delayed {
    pub fn new(inner: Arc<dyn Provider>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl Provider for Delayed {
    fn id(&self) -> ProviderId {
        self.inner.id()
    }

    fn delay(&self) -> Duration {
        self.inner.delay() + self.delay
    }

    async fn lookup(&self, cep: &Cep) -> Result<ProviderResult, ProviderError> {
        self.inner.lookup(cep).await
    }
}

/// Shared HTTP client. The timeout bounds every request, including
/// those from tasks that already lost a race.
pub fn http_client(request_timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(request_timeout).build()
}

/// Build the configured providers, wrapping any with a non-zero delay.
pub fn from_config(config: &Config, client: reqwest::Client) -> Vec<Arc<dyn Provider>> {
    let entries: [(Arc<dyn Provider>, Duration); 2] = [
        (
            Arc::new(ApiCepProvider::new(
                client.clone(),
                config.apicep.url_template.clone(),
            )),
            config.apicep.delay,
        ),
        (
            Arc::new(ViaCepProvider::new(client, config.viacep.url_template.clone())),
            config.viacep.delay,
        ),
    ];

    entries
        .into_iter()
        .map(|(provider, delay)| {
            if delay.is_zero() {
                provider
            } else {
                Arc::new(Delayed::new(provider, delay)) as Arc<dyn Provider>
            }
        })
        .collect()
}

pub(crate) fn is_client_error(status: u16) -> bool {
    (400..=599).contains(&status)
}

/// GET `url` and decode the body as `T`, mapping failures onto
/// [`ProviderError`]. Error statuses keep the raw body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, ProviderError> {
    tracing::debug!(url, "sending provider request");

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| ProviderError::Transport(e.to_string()))?;

    let status = resp.status().as_u16();
    let body = resp
        .bytes()
        .await
        .map_err(|e| ProviderError::Transport(e.to_string()))?;

    tracing::debug!(url, status, bytes = body.len(), "provider responded");

    if is_client_error(status) {
        return Err(ProviderError::Client {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;

    fn sample() -> Address {
        Address::ViaCep(ViaCepAddress {
            cep: "01310-100".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            ..ViaCepAddress::default()
        })
    }

    #[test]
    fn provider_names() {
        assert_eq!(ProviderId::ApiCep.to_string(), "apicep");
        assert_eq!(ProviderId::ViaCep.to_string(), "viacep");
    }

    #[test]
    fn client_error_range_is_inclusive() {
        assert!(!is_client_error(200));
        assert!(!is_client_error(399));
        assert!(is_client_error(400));
        assert!(is_client_error(404));
        assert!(is_client_error(599));
        assert!(!is_client_error(600));
    }

    #[test]
    fn client_error_message_keeps_body() {
        let err = ProviderError::Client {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "client error - status: 404 - body - 'not found'"
        );
    }

    #[test]
    fn address_display_lists_fields_in_order() {
        let rendered = sample().to_string();
        assert!(rendered.starts_with("{cep: 01310-100, address: "));
        assert!(rendered.contains("city: São Paulo"));
        assert!(rendered.contains("state: SP"));
        assert!(rendered.ends_with('}'));
    }

    #[tokio::test]
    async fn delayed_reports_delay_and_delegates() {
        let inner = Arc::new(MockProvider::succeeding(ProviderId::ViaCep, sample()));
        let delayed = Delayed::new(inner.clone(), Duration::from_millis(100));
        let cep = Cep::parse("01310-100").unwrap();

        assert_eq!(delayed.id(), ProviderId::ViaCep);
        assert_eq!(delayed.delay(), Duration::from_millis(100));

        let start = std::time::Instant::now();
        let result = delayed.lookup(&cep).await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(100));
        assert_eq!(result.provider, ProviderId::ViaCep);
        assert_eq!(inner.calls(), 1);
    }

    #[test]
    fn nested_delays_add_up() {
        let inner: Arc<dyn Provider> =
            Arc::new(MockProvider::succeeding(ProviderId::ApiCep, sample()));
        let once: Arc<dyn Provider> = Arc::new(Delayed::new(inner, Duration::from_millis(100)));
        let twice = Delayed::new(once, Duration::from_millis(50));
        assert_eq!(twice.delay(), Duration::from_millis(150));
    }

    #[test]
    fn from_config_attaches_delays() {
        let config = Config {
            viacep: crate::config::ProviderConfig {
                delay: Duration::from_secs(5),
                ..Config::default().viacep
            },
            ..Config::default()
        };
        let providers = from_config(&config, reqwest::Client::new());
        assert_eq!(providers[0].delay(), Duration::ZERO);
        assert_eq!(providers[1].delay(), Duration::from_secs(5));
    }

    #[test]
    fn from_config_builds_both_providers() {
        let config = Config::default();
        let providers = from_config(&config, reqwest::Client::new());
        let ids: Vec<_> = providers.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![ProviderId::ApiCep, ProviderId::ViaCep]);
    }
}
