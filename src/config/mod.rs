//! Runtime configuration, injected into the race and the providers at
//! construction time.

use std::time::Duration;

use crate::consts::{
    APICEP_URL_TEMPLATE, DEFAULT_RACE_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, VIACEP_URL_TEMPLATE,
};

/// Settings for one provider endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Endpoint with a `{cep}` placeholder.
    pub url_template: String,
    /// Artificial wait before the request. Only useful for exercising
    /// the race by hand; zero in normal use.
    pub delay: Duration,
}

impl ProviderConfig {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            delay: Duration::ZERO,
        }
    }
}

/// Settings for the race coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceConfig {
    /// Total time the caller waits for a first success.
    pub timeout: Duration,
    /// Bound for each provider call, including abandoned ones.
    pub request_timeout: Duration,
    /// Return [`RaceOutcome::Exhausted`](crate::race::RaceOutcome::Exhausted)
    /// as soon as every provider has failed instead of waiting out the
    /// timeout.
    pub fail_fast: bool,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_RACE_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            fail_fast: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub race: RaceConfig,
    pub apicep: ProviderConfig,
    pub viacep: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            race: RaceConfig::default(),
            apicep: ProviderConfig::new(APICEP_URL_TEMPLATE),
            viacep: ProviderConfig::new(VIACEP_URL_TEMPLATE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let config = Config::default();
        assert_eq!(config.apicep.url_template, APICEP_URL_TEMPLATE);
        assert_eq!(config.viacep.url_template, VIACEP_URL_TEMPLATE);
    }

    #[test]
    fn defaults_have_no_delay() {
        let config = Config::default();
        assert!(config.apicep.delay.is_zero());
        assert!(config.viacep.delay.is_zero());
    }

    #[test]
    fn default_race_waits_one_second_without_fail_fast() {
        let race = RaceConfig::default();
        assert_eq!(race.timeout, Duration::from_secs(1));
        assert_eq!(race.request_timeout, Duration::from_secs(10));
        assert!(!race.fail_fast);
    }

    #[test]
    fn struct_update_overrides_single_field() {
        let race = RaceConfig {
            fail_fast: true,
            ..RaceConfig::default()
        };
        assert!(race.fail_fast);
        assert_eq!(race.timeout, DEFAULT_RACE_TIMEOUT);
    }
}
