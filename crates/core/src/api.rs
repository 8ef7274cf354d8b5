//! Service traits for the external collaborators of the planner.
//!
//! The planner never talks HTTP itself. It calls a [`SuggestionSource`] to
//! load candidate pools and a [`PackingListApi`] to persist lists; the
//! `packed-client` crate implements both over reqwest, tests implement them
//! with scripted mocks.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::climate::Climate;
use crate::error::ApiError;
use crate::item::Item;
use crate::trip::{ItemsPayload, NewPackingList};

/// Response of the conditional-items endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub general_items: Vec<Item>,

    #[serde(default)]
    pub conditional_items: Vec<Item>,

    /// Items the user packed on earlier trips (empty for anonymous requests)
    #[serde(default)]
    pub user_favorite_items: Vec<Item>,
}

/// Response of list creation. Only the id is relied upon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedList {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A saved packing list as returned by `GET /packing_lists/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingListSummary {
    pub id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub departure_date: Option<String>,

    #[serde(default)]
    pub return_date: Option<String>,

    #[serde(default)]
    pub created: Option<String>,
}

/// An item row stored under a saved list.
///
/// The backend nests the catalogue item under `item_name`, either as a plain
/// string or as an object with a `name` field; both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default, alias = "item_name", deserialize_with = "name_or_object")]
    pub name: Option<String>,

    #[serde(default)]
    pub quantity: Option<u32>,

    #[serde(default)]
    pub packed: bool,
}

fn name_or_object<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Name {
        Plain(String),
        Nested { name: String },
        Other(serde_json::Value),
    }

    Ok(match Option::<Name>::deserialize(deserializer)? {
        Some(Name::Plain(s)) | Some(Name::Nested { name: s }) => Some(s),
        Some(Name::Other(_)) | None => None,
    })
}

/// Source of suggested items for a climate bucket.
///
/// Authentication is a property of the implementation (injected at
/// construction), not a per-call argument.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Fetch the general, conditional, and favourite pools for `climate`.
    async fn fetch_suggestions(&self, climate: Climate) -> Result<SuggestionResponse, ApiError>;
}

/// The packing-list backend.
#[async_trait]
pub trait PackingListApi: Send + Sync {
    /// `POST /packing_lists/`
    async fn create_list(&self, payload: &NewPackingList) -> Result<CreatedList, ApiError>;

    /// `POST /packing_lists/{id}/items/`
    async fn attach_items(
        &self,
        list_id: i64,
        payload: &ItemsPayload,
    ) -> Result<Vec<SavedItem>, ApiError>;

    /// `DELETE /packing_lists/{id}/`. Returns whether anything was deleted.
    ///
    /// Default implementation reports the operation as unsupported.
    async fn delete_list(&self, list_id: i64) -> Result<bool, ApiError> {
        Err(ApiError::Status {
            status_code: 405,
            message: format!("deleting packing list {list_id} is not supported"),
        })
    }

    /// `GET /packing_lists/`
    async fn list_packing_lists(&self) -> Result<Vec<PackingListSummary>, ApiError> {
        Ok(Vec::new())
    }

    /// `GET /packing_lists/{id}/items/`
    async fn list_items(&self, _list_id: i64) -> Result<Vec<SavedItem>, ApiError> {
        Ok(Vec::new())
    }
}
