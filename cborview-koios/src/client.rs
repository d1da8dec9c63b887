//! HTTP client for the Koios endpoints backing the viewer

use tracing::debug;

use crate::models::{
    EpochParamResponse, QueryChainTipResponse, UtxoInfoRequest, UtxoInfoResponse,
};
use crate::network::NetworkType;
use crate::Error;

/// Client for one Koios deployment
///
/// Holds a connection pool; clone or share it instead of building one per
/// request. The bearer token is optional, Koios serves unauthenticated
/// requests at a lower rate limit.
pub struct KoiosClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl KoiosClient {
    pub fn new(network: NetworkType) -> Self {
        Self::custom(network.base_url())
    }

    pub fn with_token(network: NetworkType, api_token: impl Into<String>) -> Self {
        KoiosClient {
            api_token: Some(api_token.into()),
            ..Self::new(network)
        }
    }

    /// Point at a self-hosted Koios deployment
    ///
    /// The URL is used as an endpoint prefix verbatim, so it needs the
    /// trailing slash, e.g. `http://localhost:8050/api/v1/`.
    pub fn custom(base_url: impl Into<String>) -> Self {
        KoiosClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `tx_hash:index` references into full output info
    pub async fn utxo_info(&self, utxo_refs: Vec<String>) -> Result<Vec<UtxoInfoResponse>, Error> {
        let url = format!("{}utxo_info", self.base_url);
        debug!(%url, refs = utxo_refs.len(), "querying utxo info");

        let request = self
            .http
            .post(url)
            .header("Accept", "application/json")
            .json(&UtxoInfoRequest::new(utxo_refs));

        let rows: Vec<UtxoInfoResponse> = self
            .authorize(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(rows)
    }

    /// Tip of the chain as the indexer sees it
    pub async fn chain_tip(&self) -> Result<QueryChainTipResponse, Error> {
        let url = format!("{}tip", self.base_url);
        debug!(%url, "querying chain tip");

        let request = self.http.get(url).header("Accept", "application/json");

        let rows: Vec<QueryChainTipResponse> = self
            .authorize(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        rows.into_iter().next().ok_or(Error::EmptyResponse("tip"))
    }

    /// Protocol parameters in force during the given epoch
    pub async fn epoch_params(&self, epoch: u64) -> Result<EpochParamResponse, Error> {
        let url = format!("{}epoch_params?_epoch_no={epoch}", self.base_url);
        debug!(%url, "querying epoch params");

        let request = self.http.get(url).header("Accept", "application/json");

        let rows: Vec<EpochParamResponse> = self
            .authorize(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        rows.into_iter()
            .next()
            .ok_or(Error::EmptyResponse("epoch_params"))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
