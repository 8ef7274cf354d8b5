//! Suggestion store: the two candidate pools and how they are loaded.
//!
//! Pools are replaced wholesale on every fetch; the only other mutation is
//! removal by reconciliation. Fetches are ticketed so that a slow response
//! cannot overwrite the result of a fetch that started later.

use packed_core::{ApiError, Climate, Item, ItemId, SuggestionResponse, SuggestionSource, WeatherReading};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Which candidate pool an item sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolKind {
    General,
    Conditional,
}

/// The general and conditional candidate pools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePools {
    pub general: Vec<Item>,
    pub conditional: Vec<Item>,
}

impl CandidatePools {
    /// Build pools from a suggestion response. Favourites are appended to the
    /// conditional pool; the general pool is taken verbatim.
    pub fn from_response(response: SuggestionResponse) -> Self {
        let SuggestionResponse {
            general_items,
            mut conditional_items,
            user_favorite_items,
        } = response;
        conditional_items.extend(user_favorite_items);
        Self {
            general: general_items,
            conditional: conditional_items,
        }
    }

    pub fn pool(&self, kind: PoolKind) -> &[Item] {
        match kind {
            PoolKind::General => &self.general,
            PoolKind::Conditional => &self.conditional,
        }
    }

    /// First entry in `kind` carrying `id`.
    pub fn find(&self, kind: PoolKind, id: ItemId) -> Option<&Item> {
        self.pool(kind).iter().find(|i| i.id == Some(id))
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.conditional.is_empty()
    }

    pub fn len(&self) -> usize {
        self.general.len() + self.conditional.len()
    }
}

/// Proof that a fetch was started, carrying its start order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    climate: Climate,
}

impl FetchTicket {
    pub fn climate(&self) -> Climate {
        self.climate
    }
}

/// Holds the candidate pools and the fetch sequencing state.
#[derive(Debug, Default)]
pub struct SuggestionStore {
    pools: CandidatePools,
    climate: Option<Climate>,
    issued: u64,
    applied: u64,
}

impl SuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pools(&self) -> &CandidatePools {
        &self.pools
    }

    /// The climate of the pools currently held, if any were loaded.
    pub fn climate(&self) -> Option<Climate> {
        self.climate
    }

    pub(crate) fn set_pools(&mut self, pools: CandidatePools) {
        self.pools = pools;
    }

    /// Start a fetch from weather readings. With no readings there is nothing
    /// to fetch and the pools stay as they are.
    pub fn begin_fetch(&mut self, readings: &[WeatherReading]) -> Option<FetchTicket> {
        Climate::from_readings(readings).map(|climate| self.begin_fetch_for(climate))
    }

    /// Start a fetch for an already classified climate.
    pub fn begin_fetch_for(&mut self, climate: Climate) -> FetchTicket {
        self.issued += 1;
        debug!(seq = self.issued, %climate, "Starting suggestion fetch");
        FetchTicket {
            seq: self.issued,
            climate,
        }
    }

    /// Replace both pools with `response`, unless a fetch that started later
    /// has already been applied. Returns whether the pools were replaced.
    pub fn apply(&mut self, ticket: FetchTicket, response: SuggestionResponse) -> bool {
        if ticket.seq <= self.applied {
            warn!(
                seq = ticket.seq,
                applied = self.applied,
                "Discarding stale suggestion response"
            );
            return false;
        }

        self.pools = CandidatePools::from_response(response);
        self.climate = Some(ticket.climate);
        self.applied = ticket.seq;
        info!(
            climate = %ticket.climate,
            general = self.pools.general.len(),
            conditional = self.pools.conditional.len(),
            "Suggestion pools replaced"
        );
        true
    }

    /// Begin, fetch, and apply in one step.
    ///
    /// Returns `Ok(false)` when there is no weather data (no request is made).
    /// On error the pools are left unchanged.
    pub async fn load(
        &mut self,
        source: &dyn SuggestionSource,
        readings: &[WeatherReading],
    ) -> Result<bool, ApiError> {
        let Some(ticket) = self.begin_fetch(readings) else {
            debug!("No weather data yet, skipping suggestion fetch");
            return Ok(false);
        };
        let response = source.fetch_suggestions(ticket.climate()).await?;
        Ok(self.apply(ticket, response))
    }
}
