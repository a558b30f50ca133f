//! HTTP client for the circuit survey endpoint.
//!
//! One request shape: `GET {base}/{circuit_id}/{year}` with a client
//! identifier header. A 200 response carries the survey JSON; any
//! other status means "no data available" for that circuit and season,
//! which is a valid terminal display state rather than an error.

use reqwest::StatusCode;
use reqwest::header::USER_AGENT;

use trackmap_pipeline::types::RawTrackSurvey;

/// Default survey endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.multiviewer.app/api/v1/circuits";

/// Client identifier sent with every survey request.
const CLIENT_IDENT: &str = concat!("trackmap/", env!("CARGO_PKG_VERSION"));

/// Errors produced by [`SurveyClient::fetch_survey`].
///
/// Only transport-level failures and malformed 200 bodies surface
/// here; a non-success HTTP status is **not** an error (see
/// [`SurveyOutcome::Unavailable`]).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request failed in transit, or a 200 body failed to decode
    /// as survey JSON.
    #[error("survey request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result of a survey fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyOutcome {
    /// Status 200: the decoded survey body.
    Available(RawTrackSurvey),
    /// Any other status: no survey data for this circuit and season.
    Unavailable {
        /// The HTTP status the endpoint answered with.
        status: u16,
    },
}

/// Survey endpoint client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct SurveyClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for SurveyClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyClient {
    /// Client against the default endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom endpoint (trailing slash tolerated).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the survey for one circuit and season.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] for connection-level failures
    /// and for 200 responses whose body does not decode as survey
    /// JSON. Non-success statuses are returned as
    /// [`SurveyOutcome::Unavailable`], not as errors.
    pub async fn fetch_survey(
        &self,
        circuit_id: u32,
        year: u16,
    ) -> Result<SurveyOutcome, FetchError> {
        let url = survey_url(&self.base_url, circuit_id, year);
        tracing::debug!(%url, "requesting circuit survey");

        let response = self
            .http
            .get(&url)
            .header(USER_AGENT, CLIENT_IDENT)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::info!(status = status.as_u16(), circuit_id, year, "survey unavailable");
            return Ok(SurveyOutcome::Unavailable {
                status: status.as_u16(),
            });
        }

        let survey = response.json::<RawTrackSurvey>().await?;
        tracing::debug!(points = survey.x.len(), corners = survey.corners.len(), "survey received");
        Ok(SurveyOutcome::Available(survey))
    }
}

fn survey_url(base: &str, circuit_id: u32, year: u16) -> String {
    format!("{}/{circuit_id}/{year}", base.trim_end_matches('/'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_circuit_and_year() {
        assert_eq!(
            survey_url("https://example.test/api/v1/circuits", 19, 2024),
            "https://example.test/api/v1/circuits/19/2024",
        );
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        assert_eq!(
            survey_url("https://example.test/circuits/", 7, 2023),
            "https://example.test/circuits/7/2023",
        );
    }

    #[test]
    fn client_ident_names_the_crate() {
        assert!(CLIENT_IDENT.starts_with("trackmap/"));
    }
}
