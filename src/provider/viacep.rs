use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Address, Provider, ProviderError, ProviderId, ProviderResult, get_json};
use crate::cep::Cep;
use crate::consts::render_url;

/// Response body served by viacep, with its Portuguese keys mapped
/// onto English field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaCepAddress {
    pub cep: String,
    #[serde(rename = "logradouro")]
    pub address: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "localidade")]
    pub city: String,
    #[serde(rename = "uf")]
    pub state: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

impl ViaCepAddress {
    pub(crate) fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("cep", self.cep.clone()),
            ("address", self.address.clone()),
            ("complement", self.complement.clone()),
            ("neighborhood", self.neighborhood.clone()),
            ("city", self.city.clone()),
            ("state", self.state.clone()),
            ("ibge", self.ibge.clone()),
            ("gia", self.gia.clone()),
            ("ddd", self.ddd.clone()),
            ("siafi", self.siafi.clone()),
        ]
    }
}

pub struct ViaCepProvider {
    client: reqwest::Client,
    url_template: String,
}

impl ViaCepProvider {
    pub fn new(client: reqwest::Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }
}

#[async_trait]
impl Provider for ViaCepProvider {
    fn id(&self) -> ProviderId {
        ProviderId::ViaCep
    }

    async fn lookup(&self, cep: &Cep) -> Result<ProviderResult, ProviderError> {
        let url = render_url(&self.url_template, cep.as_str());
        let address: ViaCepAddress = get_json(&self.client, &url).await?;
        Ok(ProviderResult {
            provider: ProviderId::ViaCep,
            address: Address::ViaCep(address),
        })
    }
}
