//! Project-wide constants.

use std::time::Duration;

/// Placeholder substituted with the CEP in endpoint templates.
pub const CEP_PLACEHOLDER: &str = "{cep}";

pub const APICEP_URL_TEMPLATE: &str = "https://cdn.apicep.com/file/apicep/{cep}.json";
pub const VIACEP_URL_TEMPLATE: &str = "http://viacep.com.br/ws/{cep}/json";

/// How long the race waits for the first provider before giving up.
pub const DEFAULT_RACE_TIMEOUT: Duration = Duration::from_secs(1);

/// Upper bound for a single provider call, so abandoned tasks still finish.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const TIMEOUT_MESSAGE: &str = "[error] provider cep response timed out";
pub const EXHAUSTED_MESSAGE: &str = "[error] all cep providers failed";

/// Fill a `{cep}` endpoint template.
pub fn render_url(template: &str, cep: &str) -> String {
    template.replace(CEP_PLACEHOLDER, cep)
}
