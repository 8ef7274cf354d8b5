//! List submission: create the list, then attach its items.
//!
//! The two calls are sequential and not transactional. A failure on the
//! second call leaves an empty list behind on the backend; that outcome is
//! reported as [`SubmissionOutcome::Partial`] rather than swallowed, and is
//! only cleaned up when [`SubmissionPolicy::rollback_orphaned_lists`] is set.

use std::sync::Arc;

use packed_core::{ApiError, PackingListApi, SavedItem, SubmissionError, TripContext};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::working_list::WorkingList;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPolicy {
    /// Delete the created list when attaching its items fails.
    pub rollback_orphaned_lists: bool,
}

/// How a submission ended, short of failing to create the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The working list was empty; nothing was sent.
    Skipped,

    /// The list was created and all items attached.
    Complete { list_id: i64, items: Vec<SavedItem> },

    /// The list was created but attaching items failed.
    Partial {
        list_id: i64,
        error: ApiError,
        /// Whether the orphaned list was deleted again
        rolled_back: bool,
    },
}

impl SubmissionOutcome {
    pub fn list_id(&self) -> Option<i64> {
        match self {
            SubmissionOutcome::Skipped => None,
            SubmissionOutcome::Complete { list_id, .. }
            | SubmissionOutcome::Partial { list_id, .. } => Some(*list_id),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SubmissionOutcome::Complete { .. })
    }
}

/// Submits a working list to the packing-list backend.
pub struct SubmissionService {
    api: Arc<dyn PackingListApi>,
    owner: i64,
    policy: SubmissionPolicy,
}

impl SubmissionService {
    pub fn new(api: Arc<dyn PackingListApi>, owner: i64) -> Self {
        Self {
            api,
            owner,
            policy: SubmissionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SubmissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn owner(&self) -> i64 {
        self.owner
    }

    /// Create a list for `trip` and attach every item of `list` to it.
    ///
    /// An empty list makes no calls and yields [`SubmissionOutcome::Skipped`].
    /// A failed creation is an error and no items are sent.
    pub async fn submit(
        &self,
        list: &WorkingList,
        trip: &TripContext,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        if list.is_empty() {
            info!("Working list is empty, nothing to submit");
            return Ok(SubmissionOutcome::Skipped);
        }

        let payload = trip.creation_payload(self.owner);
        debug!(title = %payload.title, items = list.len(), "Creating packing list");

        let created = self.api.create_list(&payload).await.map_err(|e| {
            warn!(status = ?e.status_code(), error = %e, "Packing list creation failed");
            SubmissionError::CreateFailed(e)
        })?;
        let list_id = created.id.ok_or(SubmissionError::MissingListId)?;

        match self.api.attach_items(list_id, &list.to_payload()).await {
            Ok(items) => {
                info!(list_id, items = list.len(), "Packing list submitted");
                Ok(SubmissionOutcome::Complete { list_id, items })
            }
            Err(error) => {
                warn!(list_id, status = ?error.status_code(), %error, "Attaching items failed");
                let rolled_back = self.policy.rollback_orphaned_lists && self.rollback(list_id).await;
                Ok(SubmissionOutcome::Partial {
                    list_id,
                    error,
                    rolled_back,
                })
            }
        }
    }

    async fn rollback(&self, list_id: i64) -> bool {
        match self.api.delete_list(list_id).await {
            Ok(deleted) => {
                info!(list_id, deleted, "Rolled back orphaned packing list");
                deleted
            }
            Err(e) => {
                warn!(list_id, error = %e, "Failed to roll back orphaned packing list");
                false
            }
        }
    }
}
