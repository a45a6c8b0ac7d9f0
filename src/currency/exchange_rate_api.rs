//! HTTP rate provider for the ExchangeRate-API v6 `pair` endpoint.

use std::{env, time::Duration};

use reqwest::{blocking::Client, Url};
use serde::Deserialize;
use tracing::debug;

use super::RateProvider;
use crate::{
    config::{RateApiConfig, API_KEY_ENV},
    errors::RateUnavailableError,
};

/// Looks up one pair per request: `GET {base_url}/{api_key}/pair/{from}/{to}`.
pub struct ExchangeRateApiProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ExchangeRateApiProvider {
    pub fn new(
        settings: &RateApiConfig,
        api_key: Option<String>,
    ) -> Result<Self, RateUnavailableError> {
        let client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self::with_client(client, settings, api_key))
    }

    /// Uses a caller-built client. Its timeout should match `settings`, which
    /// is what timeout errors report.
    pub fn with_client(client: Client, settings: &RateApiConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            timeout: settings.timeout(),
        }
    }

    /// Reads the credential from `EXCHANGE_RATE_API_KEY`. A missing key is
    /// reported on each lookup rather than here.
    pub fn from_env(settings: &RateApiConfig) -> Result<Self, RateUnavailableError> {
        Self::new(settings, env::var(API_KEY_ENV).ok())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Each segment is percent-encoded, so a code containing `/`, `?` or `#`
    /// cannot change the requested pair.
    fn pair_url(&self, api_key: &str, from: &str, to: &str) -> Result<Url, RateUnavailableError> {
        // Never echo the URL itself: once built it carries the credential.
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| RateUnavailableError::InvalidEndpoint(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| {
                let reason = format!("`{}` cannot take a path", self.base_url);
                RateUnavailableError::InvalidEndpoint(reason)
            })?
            .pop_if_empty()
            .extend([api_key, "pair", from, to]);
        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> RateUnavailableError {
        if err.is_timeout() {
            RateUnavailableError::Timeout(self.timeout)
        } else {
            // The URL carries the credential.
            RateUnavailableError::Network(err.without_url())
        }
    }
}

impl RateProvider for ExchangeRateApiProvider {
    fn rate(&self, from: &str, to: &str) -> Result<f64, RateUnavailableError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| RateUnavailableError::MissingCredential(API_KEY_ENV.to_string()))?;
        debug!(from, to, "requesting conversion rate");
        let response = self
            .client
            .get(self.pair_url(api_key, from, to)?)
            .send()
            .map_err(|err| self.transport_error(err))?;
        let status = response.status();
        let body = response.text().map_err(|err| self.transport_error(err))?;
        if !status.is_success() {
            return Err(match parse_pair_response(&body, from, to) {
                Err(rejected @ RateUnavailableError::Rejected { .. }) => rejected,
                _ => RateUnavailableError::Status(status.as_u16()),
            });
        }
        parse_pair_response(&body, from, to)
    }
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    result: Option<String>,
    conversion_rate: Option<f64>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

fn parse_pair_response(body: &str, from: &str, to: &str) -> Result<f64, RateUnavailableError> {
    let parsed: PairResponse = serde_json::from_str(body)
        .map_err(|err| RateUnavailableError::Malformed(err.to_string()))?;
    if parsed.result.as_deref() == Some("error") || parsed.error_type.is_some() {
        return Err(RateUnavailableError::Rejected {
            from: from.to_string(),
            to: to.to_string(),
            reason: parsed
                .error_type
                .unwrap_or_else(|| "unknown-error".to_string()),
        });
    }
    parsed
        .conversion_rate
        .ok_or_else(|| RateUnavailableError::MissingRate {
            from: from.to_string(),
            to: to.to_string(),
        })
}
