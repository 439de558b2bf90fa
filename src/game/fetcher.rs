//! Creature fetcher backed by PokéAPI.
//!
//! One GET per round to `{base_url}/pokemon/{id}`. Only three parts of the
//! (large) response are consumed: `name`, the six `stats`, and the official
//! artwork URL. Everything else is ignored by serde.

use async_trait::async_trait;
use log::debug;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;

use super::errors::FetchError;
use super::scorer::base_stat_total;
use crate::config::{ApiConfig, MAX_CREATURE_ID};

/// PokéAPI response structures
#[derive(Debug, Deserialize)]
pub struct PokemonResponse {
    pub name: String,
    pub stats: Vec<PokemonStat>,
    pub sprites: PokemonSprites,
}

#[derive(Debug, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PokemonSprites {
    pub other: OtherSprites,
}

#[derive(Debug, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Artwork,
}

#[derive(Debug, Deserialize)]
pub struct Artwork {
    pub front_default: Option<String>,
}

/// One named base stat, e.g. `hp = 45`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

/// The slice of a creature record the game cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    pub id: u32,
    /// Lowercase API name, e.g. `bulbasaur`
    pub name: String,
    pub stats: Vec<Stat>,
    pub image_url: String,
}

impl Creature {
    pub fn stat_values(&self) -> Vec<u32> {
        self.stats.iter().map(|s| s.value).collect()
    }

    pub fn base_stat_total(&self) -> u32 {
        base_stat_total(&self.stat_values())
    }
}

/// Decode a `/pokemon/{id}` body into a [`Creature`].
pub fn parse_creature(id: u32, body: &str) -> Result<Creature, FetchError> {
    let response: PokemonResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let image_url = response
        .sprites
        .other
        .official_artwork
        .front_default
        .ok_or_else(|| FetchError::Malformed("missing official artwork url".to_string()))?;

    Ok(Creature {
        id,
        name: response.name,
        stats: response
            .stats
            .into_iter()
            .map(|s| Stat {
                name: s.stat.name,
                value: s.base_stat,
            })
            .collect(),
        image_url,
    })
}

/// Pick a creature id uniformly in `1..=max_id`.
pub fn random_creature_id(max_id: u32) -> u32 {
    rand::thread_rng().gen_range(1..=max_id.max(1))
}

/// Anything that can hand the session a creature.
#[async_trait]
pub trait CreatureSource: Send + Sync {
    /// Fetch the creature with the given id.
    async fn fetch(&self, id: u32) -> Result<Creature, FetchError>;

    /// Largest id `fetch` accepts.
    fn max_id(&self) -> u32 {
        MAX_CREATURE_ID
    }

    /// Fetch a uniformly random creature.
    async fn fetch_random(&self) -> Result<Creature, FetchError> {
        let id = random_creature_id(self.max_id());
        self.fetch(id).await
    }
}

/// reqwest-backed [`CreatureSource`] talking to PokéAPI.
pub struct PokeApiClient {
    config: ApiConfig,
    max_id: u32,
    client: reqwest::Client,
}

impl PokeApiClient {
    pub fn new(config: ApiConfig, max_id: u32) -> Self {
        Self::with_client(config, max_id, reqwest::Client::new())
    }

    /// Use a preconfigured reqwest client (proxy settings, custom TLS, ...).
    pub fn with_client(config: ApiConfig, max_id: u32, client: reqwest::Client) -> Self {
        Self {
            config,
            max_id: max_id.max(1),
            client,
        }
    }

    /// Build the API URL for one creature id
    pub fn creature_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.config.base_url.trim_end_matches('/'), id)
    }

    async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl CreatureSource for PokeApiClient {
    async fn fetch(&self, id: u32) -> Result<Creature, FetchError> {
        let url = self.creature_url(id);
        debug!("Fetching creature from: {}", url);

        let timeout_duration = Duration::from_secs(self.config.timeout_seconds as u64);
        let body = timeout(timeout_duration, self.fetch_body(&url))
            .await
            .map_err(|_| FetchError::Timeout(self.config.timeout_seconds))??;

        let creature = parse_creature(id, &body)?;
        debug!(
            "Fetched #{} {} (BST {})",
            creature.id,
            creature.name,
            creature.base_stat_total()
        );
        Ok(creature)
    }

    fn max_id(&self) -> u32 {
        self.max_id
    }
}
