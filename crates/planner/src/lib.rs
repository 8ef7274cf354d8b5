//! The packing-list planner.
//!
//! State flows in one direction and is owned by a single [`PackingSession`]:
//!
//! 1. **Suggestions** load into two candidate pools keyed by climate
//! 2. **The user** adds items by hand or promotes them out of a pool
//! 3. **Reconciliation** runs after every change, linking list entries to
//!    their canonical suggestion and pulling them out of the pools
//! 4. **Submission** creates the list on the backend, then attaches items
//!
//! Readers of the session only ever see post-reconciliation state.

pub mod reconcile;
pub mod session;
pub mod submission;
pub mod suggestions;
pub mod working_list;

#[cfg(test)]
mod test_helpers;

pub use reconcile::{reconcile, Match, Reconciliation};
pub use session::{Action, ActionOutcome, PackingSession};
pub use submission::{SubmissionOutcome, SubmissionPolicy, SubmissionService};
pub use suggestions::{CandidatePools, FetchTicket, PoolKind, SuggestionStore};
pub use working_list::WorkingList;
