//! Koios deployment URLs per Cardano network

use serde::{Deserialize, Serialize};

/// Cardano network a Koios query is routed to
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkType {
    Mainnet,
    PreprodTestnet,
    PreviewTestnet,
}

impl NetworkType {
    pub fn base_url(&self) -> &'static str {
        match self {
            NetworkType::Mainnet => "https://api.koios.rest/api/v1/",
            NetworkType::PreprodTestnet => "https://preprod.koios.rest/api/v1/",
            NetworkType::PreviewTestnet => "https://preview.koios.rest/api/v1/",
        }
    }

    pub fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url(), endpoint)
    }
}
