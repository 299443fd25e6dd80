use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::clients::errors::{Error, Result};

/// Environment variable naming the ytmusicapi-compatible endpoint.
pub const ENDPOINT_ENV: &str = "YTM_API_URL";
/// Optional environment variable arming a per-request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "YTM_API_TIMEOUT_SECS";

/// Client for a ytmusicapi-compatible metadata endpoint.
///
/// The endpoint does the heavy lifting of talking to YouTube Music and
/// flattening its responses; this client only issues the three queries the
/// subcommands need and passes the JSON through untouched.
pub struct YtMusicClient {
    http: Client,
    /// Base URL stored without a trailing slash.
    base_url: String,
}

impl YtMusicClient {
    /// Creates a client for the given endpoint with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a client for the given endpoint, optionally with a
    /// per-request timeout. Without one, a hung request blocks the whole
    /// process, like the tool has always behaved.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("ytm-api/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            // Trim any trailing slash once so request paths join cleanly.
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the environment or fails with a configuration
    /// error. `YTM_API_URL` is required, `YTM_API_TIMEOUT_SECS` optional.
    pub fn try_default() -> Result<Self> {
        let base_url = std::env::var(ENDPOINT_ENV).map_err(|_| {
            Error::Configuration(format!(
                "Missing {ENDPOINT_ENV} in environment variables. Check README.md for details"
            ))
        })?;

        let timeout = match std::env::var(TIMEOUT_ENV) {
            Ok(secs) => {
                let secs: u64 = secs.parse().map_err(|_| {
                    Error::Configuration(format!(
                        "{TIMEOUT_ENV} must be a whole number of seconds"
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Self::with_timeout(base_url, timeout)
    }

    /// Runs one search query and returns its flattened result objects.
    pub async fn search(&self, query: &str) -> Result<Vec<Map<String, Value>>> {
        let url = format!("{}/search", self.base_url);
        debug!("Searching {url} for {query:?}");

        let response = self
            .http
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;
        Ok(serde_json::from_str(&success_body(response).await?)?)
    }

    /// Fetches the full profile object for one artist channel ID.
    pub async fn get_artist(&self, id: &str) -> Result<Map<String, Value>> {
        let url = format!("{}/artist", self.base_url);
        debug!("Fetching artist {id} from {url}");

        let response = self.http.get(&url).query(&[("id", id)]).send().await?;
        Ok(serde_json::from_str(&success_body(response).await?)?)
    }

    /// Fetches a browse page of an artist catalog section. `limit` of `None`
    /// asks the endpoint for the whole section.
    pub async fn get_artist_albums(
        &self,
        browse_id: &str,
        params: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<Map<String, Value>>> {
        let url = format!("{}/artist_albums", self.base_url);
        debug!("Browsing {url} with {browse_id:?}");

        let mut query: Vec<(&str, String)> = vec![("browse_id", browse_id.to_string())];
        if let Some(params) = params {
            query.push(("params", params.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let response = self.http.get(&url).query(&query).send().await?;
        Ok(serde_json::from_str(&success_body(response).await?)?)
    }
}

/// Extracts the response body, mapping non-success statuses to errors.
async fn success_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::HttpStatus { status, body });
    }

    Ok(body)
}
