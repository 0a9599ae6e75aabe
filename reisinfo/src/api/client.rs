//! NS travel information HTTP client.
//!
//! Every request is a single GET; there is no retry and no timeout beyond
//! reqwest's default.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{ApiKey, Settings};
use crate::domain::{DeparturesResponse, DisruptionsResponse, StationDirectory};

use super::envelope::{Envelope, decode};
use super::error::ClientError;

/// Default base URL for the NS travel information API.
const DEFAULT_BASE_URL: &str = "https://gateway.apiportal.ns.nl/reisinformatie-api/api/";

/// Header carrying the subscription key.
const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";

/// Query parameters for `v2/departures`.
#[derive(Debug, Serialize)]
pub struct DepartureParams<'a> {
    /// Station code, e.g. `UT`.
    pub station: &'a str,
}

/// Query parameters for `v3/disruptions`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisruptionParams {
    pub is_active: bool,
}

/// An empty query string.
#[derive(Debug, Default, Serialize)]
pub struct NoParams {}

/// Configuration for the NS client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Subscription key sent with every request
    pub api_key: ApiKey,
    /// Base URL for the API
    pub base_url: String,
}

impl ClientConfig {
    /// Create a new config with the given key and the production base URL.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build a config from environment settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let config = Self::new(settings.api_key.clone());
        match &settings.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the NS travel information API.
#[derive(Debug, Clone)]
pub struct NsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(config.api_key.as_str())?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(SUBSCRIPTION_KEY_HEADER), key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Absolute URL for an endpoint path relative to the base URL.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// GET `endpoint` and decode the JSON body as `T`.
    ///
    /// The HTTP status is not inspected: error responses are recognised by
    /// their body shape (see [`decode`]).
    pub async fn send<T, Q>(
        &self,
        endpoint: &str,
        query: &Q,
        envelope: Envelope,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        debug!(%url, "sending request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%url, %status, bytes = body.len(), "received response");

        decode(&body, envelope)
    }

    /// Fetch the full station list.
    pub async fn stations(&self) -> Result<StationDirectory, ClientError> {
        self.send("v2/stations", &NoParams::default(), Envelope::Bare)
            .await
    }

    /// Fetch the departure board for a station code.
    pub async fn departures(&self, station_code: &str) -> Result<DeparturesResponse, ClientError> {
        let params = DepartureParams {
            station: station_code,
        };
        self.send("v2/departures", &params, Envelope::Bare).await
    }

    /// Fetch currently active disruptions.
    pub async fn disruptions(&self) -> Result<DisruptionsResponse, ClientError> {
        let params = DisruptionParams { is_active: true };
        self.send("v3/disruptions", &params, Envelope::Keyed("disruptions"))
            .await
    }
}
