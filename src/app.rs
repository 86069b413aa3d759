//! The whole lookup as the binary runs it: validate, race, render one line.

use tracing::debug;

use crate::cep::Cep;
use crate::config::Config;
use crate::consts::{EXHAUSTED_MESSAGE, TIMEOUT_MESSAGE};
use crate::provider;
use crate::race::{Race, RaceOutcome};

/// The single stdout line for a finished race.
pub fn render(outcome: &RaceOutcome) -> String {
    match outcome {
        RaceOutcome::Success(result) => format!(
            "response received by provider {}. Result: {}",
            result.provider, result.address
        ),
        RaceOutcome::Timeout => TIMEOUT_MESSAGE.to_string(),
        RaceOutcome::Exhausted => EXHAUSTED_MESSAGE.to_string(),
    }
}

/// Validate `arg` and, only if it is a well-formed CEP, race the configured
/// providers. Returns the line to print; errors only when the HTTP client
/// cannot be built.
pub async fn run(arg: Option<&str>, config: &Config) -> reqwest::Result<String> {
    let cep = match Cep::from_arg(arg) {
        Ok(cep) => cep,
        Err(e) => return Ok(e.to_string()),
    };

    debug!(%cep, ?config, "starting race");

    let client = provider::http_client(config.race.request_timeout)?;
    let race = Race::new(provider::from_config(config, client), config.race.clone());
    let outcome = race.run(&cep).await;

    Ok(render(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Address, ApiCepAddress, ProviderId, ProviderResult};

    #[test]
    fn success_line_names_provider_and_payload() {
        let outcome = RaceOutcome::Success(ProviderResult {
            provider: ProviderId::ApiCep,
            address: Address::ApiCep(ApiCepAddress {
                code: "01310-100".to_string(),
                state: "SP".to_string(),
                ..ApiCepAddress::default()
            }),
        });

        let line = render(&outcome);
        assert!(line.starts_with("response received by provider apicep. Result: {code: 01310-100, state: SP, "));
        assert!(line.ends_with("statusText: }"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn timeout_line() {
        assert_eq!(
            render(&RaceOutcome::Timeout),
            "[error] provider cep response timed out"
        );
    }

    #[test]
    fn exhausted_line() {
        assert_eq!(
            render(&RaceOutcome::Exhausted),
            "[error] all cep providers failed"
        );
    }

    #[tokio::test]
    async fn missing_argument_line() {
        let line = run(None, &Config::default()).await.unwrap();
        assert_eq!(line, "[error] cep argument not informed");
    }
}
