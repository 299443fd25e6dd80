use futures::stream::{StreamExt, TryStreamExt, iter};
use log::debug;
use serde_json::{Map, Value};

use crate::clients::YtMusicClient;
use crate::clients::errors::{Error, Result};

/// Upper bound on in-flight search requests.
pub const SEARCH_CONCURRENCY: usize = 12;

/// Runtime configuration shared by the query operations.
pub struct Config {
    /// The metadata client the operations run against.
    pub client: YtMusicClient,
    /// How many search requests may be in flight at once.
    pub concurrency: usize,
}

/// Builder assembling a [`Config`], falling back to environment-based
/// defaults for anything not set explicitly.
pub struct ConfigBuilder {
    client: Option<YtMusicClient>,
    concurrency: Option<usize>,
}

impl ConfigBuilder {
    /// Creates a builder with nothing set.
    pub fn new() -> Self {
        Self {
            client: None,
            concurrency: None,
        }
    }

    /// Overrides the metadata client, e.g. to point it at a mock server.
    pub fn client(mut self, client: YtMusicClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Overrides the search concurrency bound.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Builds the configuration, constructing the client from the
    /// environment when none was injected.
    pub fn build(self) -> Result<Config> {
        let client = match self.client {
            Some(client) => client,
            None => YtMusicClient::try_default()?,
        };

        Ok(Config {
            client,
            concurrency: self.concurrency.unwrap_or(SEARCH_CONCURRENCY).max(1),
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A catalog section of an artist profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistSection {
    /// Full-length releases.
    Albums,
    /// Individual tracks.
    Songs,
    /// Singles and EPs.
    Singles,
}

impl ArtistSection {
    /// The profile key the section lives under.
    pub fn as_str(self) -> &'static str {
        match self {
            ArtistSection::Albums => "albums",
            ArtistSection::Songs => "songs",
            ArtistSection::Singles => "singles",
        }
    }
}

/// Searches for every term and returns the flattened results.
///
/// Requests run concurrently, at most [`Config::concurrency`] in flight,
/// and per-term result lists keep term order. With `top_result_only`, each
/// term's list is first narrowed to its "Top result" entries. A single
/// overall hit collapses to the bare object instead of a one-element array.
pub async fn search(config: &Config, terms: &[String], top_result_only: bool) -> Result<Value> {
    if terms.is_empty() {
        return Err(Error::NoSearchTerms);
    }

    let client = &config.client;
    debug!(
        "Searching {} term(s), at most {} in flight",
        terms.len(),
        config.concurrency
    );

    let per_term: Vec<Vec<Map<String, Value>>> = iter(terms)
        .map(|term| async move {
            let mut items = client.search(term).await?;
            if top_result_only {
                items.retain(|item| {
                    item.get("category").and_then(Value::as_str) == Some("Top result")
                });
            }
            Ok::<_, Error>(items)
        })
        .buffered(config.concurrency)
        .try_collect()
        .await?;

    let mut results: Vec<Map<String, Value>> = per_term.into_iter().flatten().collect();

    if results.is_empty() {
        return Err(Error::NothingFound);
    }
    if results.len() == 1 {
        return Ok(Value::Object(results.remove(0)));
    }

    Ok(Value::Array(results.into_iter().map(Value::Object).collect()))
}

/// Fetches one profile object per artist ID, in input order.
///
/// An empty ID list yields an empty array; this family does not validate
/// its input the way `search` does.
pub async fn artist(config: &Config, ids: &[String]) -> Result<Value> {
    let mut profiles = Vec::with_capacity(ids.len());

    for id in ids {
        let profile = config.client.get_artist(id).await?;
        profiles.push(Value::Object(profile));
    }

    Ok(Value::Array(profiles))
}

/// Collects every item of one catalog section across the given artists.
///
/// Sections small enough to inline carry an empty `browseId` and their items
/// directly under `results`; larger ones carry a non-empty `browseId` (plus
/// `params`) pointing at a dedicated browse page, which is then fetched with
/// no limit. Artists lacking the section, or whose section has no `browseId`
/// key at all, contribute nothing.
pub async fn artist_items(
    config: &Config,
    ids: &[String],
    section: ArtistSection,
) -> Result<Value> {
    let mut items: Vec<Value> = Vec::new();

    for id in ids {
        let profile = config.client.get_artist(id).await?;

        let Some(category) = profile.get(section.as_str()).and_then(Value::as_object) else {
            debug!("Artist {id} has no {} section", section.as_str());
            continue;
        };
        let Some(browse_id) = category.get("browseId") else {
            continue;
        };

        match browse_id.as_str().filter(|browse_id| !browse_id.is_empty()) {
            Some(browse_id) => {
                let params = category.get("params").and_then(Value::as_str);
                let fetched = config
                    .client
                    .get_artist_albums(browse_id, params, None)
                    .await?;
                items.extend(fetched.into_iter().map(Value::Object));
            }
            // An empty browse ID means the section is already inlined.
            None => {
                if let Some(inline) = category.get("results").and_then(Value::as_array) {
                    items.extend(inline.iter().cloned());
                }
            }
        }
    }

    Ok(Value::Array(items))
}
