use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Address, Provider, ProviderError, ProviderId, ProviderResult, get_json};
use crate::cep::Cep;
use crate::consts::render_url;

/// Response body served by apicep. Missing fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiCepAddress {
    pub code: String,
    pub state: String,
    pub city: String,
    pub district: String,
    pub address: String,
    pub status: i64,
    pub ok: bool,
    #[serde(rename = "statusText")]
    pub status_text: String,
}

impl ApiCepAddress {
    pub(crate) fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("code", self.code.clone()),
            ("state", self.state.clone()),
            ("city", self.city.clone()),
            ("district", self.district.clone()),
            ("address", self.address.clone()),
            ("status", self.status.to_string()),
            ("ok", self.ok.to_string()),
            ("statusText", self.status_text.clone()),
        ]
    }
}

pub struct ApiCepProvider {
    client: reqwest::Client,
    url_template: String,
}

impl ApiCepProvider {
    pub fn new(client: reqwest::Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }
}

#[async_trait]
impl Provider for ApiCepProvider {
    fn id(&self) -> ProviderId {
        ProviderId::ApiCep
    }

    async fn lookup(&self, cep: &Cep) -> Result<ProviderResult, ProviderError> {
        let url = render_url(&self.url_template, cep.as_str());
        let address: ApiCepAddress = get_json(&self.client, &url).await?;
        Ok(ProviderResult {
            provider: ProviderId::ApiCep,
            address: Address::ApiCep(address),
        })
    }
}
