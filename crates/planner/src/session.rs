//! The packing session: single owner of the working list and the pools.
//!
//! Every state change goes through [`PackingSession::dispatch`], which
//! applies the action and then reconciles before returning. Anything read
//! from the session afterwards is post-reconciliation state.

use packed_core::{
    ApiError, Climate, Error, Item, ItemId, Quantity, SubmissionError, SuggestionResponse,
    SuggestionSource, TripContext, WeatherReading,
};
use tracing::debug;

use crate::reconcile::reconcile;
use crate::submission::{SubmissionOutcome, SubmissionService};
use crate::suggestions::{CandidatePools, FetchTicket, PoolKind, SuggestionStore};
use crate::working_list::WorkingList;

/// A state change requested by the user or by a completed fetch.
#[derive(Debug, Clone)]
pub enum Action {
    /// Add an item typed by the user (or supplied by the caller).
    AddItem(Item),

    /// Move a pool entry into the working list.
    Promote { pool: PoolKind, id: ItemId },

    /// Remove the first item named exactly this.
    RemoveItem(String),

    SetQuantity { name: String, quantity: Quantity },

    /// Replace both pools with a fetch result.
    ReplacePools {
        ticket: FetchTicket,
        response: SuggestionResponse,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// An item with the same name (ignoring case) is already listed.
    Duplicate,
    /// No item or pool entry matched.
    NotFound,
    /// A newer fetch has already been applied.
    Stale,
}

pub struct PackingSession {
    trip: TripContext,
    list: WorkingList,
    store: SuggestionStore,
}

impl PackingSession {
    pub fn new(trip: TripContext) -> Self {
        Self {
            trip,
            list: WorkingList::new(),
            store: SuggestionStore::new(),
        }
    }

    pub fn trip(&self) -> &TripContext {
        &self.trip
    }

    pub fn list(&self) -> &WorkingList {
        &self.list
    }

    pub fn pools(&self) -> &CandidatePools {
        self.store.pools()
    }

    pub fn climate(&self) -> Option<Climate> {
        self.store.climate()
    }

    /// Apply `action`, then reconcile.
    pub fn dispatch(&mut self, action: Action) -> ActionOutcome {
        let outcome = match action {
            Action::AddItem(item) => {
                if self.list.contains_name(&item.name) {
                    debug!(name = %item.name, "Item already listed");
                    ActionOutcome::Duplicate
                } else {
                    self.list.add(item);
                    ActionOutcome::Applied
                }
            }
            Action::Promote { pool, id } => match self.store.pools().find(pool, id).cloned() {
                Some(entry) if self.list.contains_name(&entry.name) => ActionOutcome::Duplicate,
                Some(entry) => {
                    self.list.add(entry);
                    ActionOutcome::Applied
                }
                None => ActionOutcome::NotFound,
            },
            Action::RemoveItem(name) => match self.list.remove(&name) {
                Some(_) => ActionOutcome::Applied,
                None => {
                    debug!(%name, "Remove: item not found");
                    ActionOutcome::NotFound
                }
            },
            Action::SetQuantity { name, quantity } => {
                if self.list.set_quantity(&name, quantity) {
                    ActionOutcome::Applied
                } else {
                    debug!(%name, "Set quantity: item not found");
                    ActionOutcome::NotFound
                }
            }
            Action::ReplacePools { ticket, response } => {
                if self.store.apply(ticket, response) {
                    ActionOutcome::Applied
                } else {
                    ActionOutcome::Stale
                }
            }
        };

        if outcome == ActionOutcome::Applied {
            self.reconcile();
        }
        outcome
    }

    fn reconcile(&mut self) {
        let pass = reconcile(&self.list, self.store.pools());
        if pass.changed() {
            self.list = pass.list;
            self.store.set_pools(pass.pools);
        }
    }

    // ── Convenience wrappers ──

    pub fn add_item(&mut self, item: Item) -> ActionOutcome {
        self.dispatch(Action::AddItem(item))
    }

    pub fn add_custom(&mut self, name: impl Into<String>) -> ActionOutcome {
        self.add_item(Item::custom(name))
    }

    pub fn promote(&mut self, pool: PoolKind, id: ItemId) -> ActionOutcome {
        self.dispatch(Action::Promote { pool, id })
    }

    pub fn remove_item(&mut self, name: &str) -> ActionOutcome {
        self.dispatch(Action::RemoveItem(name.to_string()))
    }

    /// Set a quantity from raw user input, rejecting values outside `[1, 1000]`.
    pub fn set_quantity(&mut self, name: &str, value: u32) -> Result<ActionOutcome, Error> {
        let quantity = Quantity::new(value)?;
        Ok(self.dispatch(Action::SetQuantity {
            name: name.to_string(),
            quantity,
        }))
    }

    // ── Suggestions ──

    /// Start a fetch; `None` when there is no weather data yet.
    pub fn begin_fetch(&mut self, readings: &[WeatherReading]) -> Option<FetchTicket> {
        self.store.begin_fetch(readings)
    }

    pub fn begin_fetch_for(&mut self, climate: Climate) -> FetchTicket {
        self.store.begin_fetch_for(climate)
    }

    pub fn finish_fetch(&mut self, ticket: FetchTicket, response: SuggestionResponse) -> ActionOutcome {
        self.dispatch(Action::ReplacePools { ticket, response })
    }

    /// Fetch suggestions for `readings` and apply them.
    ///
    /// Returns `Ok(None)` when there is no weather data and no request was made.
    pub async fn refresh_suggestions(
        &mut self,
        source: &dyn SuggestionSource,
        readings: &[WeatherReading],
    ) -> Result<Option<ActionOutcome>, ApiError> {
        let Some(ticket) = self.begin_fetch(readings) else {
            return Ok(None);
        };
        let response = source.fetch_suggestions(ticket.climate()).await?;
        Ok(Some(self.finish_fetch(ticket, response)))
    }

    // ── Submission ──

    /// Submit the working list. The list is kept afterwards for further edits.
    pub async fn submit(
        &self,
        service: &SubmissionService,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        service.submit(&self.list, &self.trip).await
    }
}
