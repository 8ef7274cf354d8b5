//! Shared test helpers for planner tests.

use std::sync::Mutex;

use async_trait::async_trait;
use packed_core::{
    ApiError, Climate, CreatedList, Item, ItemsPayload, NewPackingList, PackingListApi, SavedItem,
    SuggestionResponse, SuggestionSource,
};

use crate::suggestions::CandidatePools;
use crate::working_list::WorkingList;

/// A working list of custom items with the given names.
pub fn list_of(names: &[&str]) -> WorkingList {
    let mut list = WorkingList::new();
    for name in names {
        list.add(Item::custom(*name));
    }
    list
}

fn items(entries: &[(i64, &str)]) -> Vec<Item> {
    entries
        .iter()
        .map(|(id, name)| Item::suggestion(*id, *name))
        .collect()
}

pub fn pools_of(general: &[(i64, &str)], conditional: &[(i64, &str)]) -> CandidatePools {
    CandidatePools {
        general: items(general),
        conditional: items(conditional),
    }
}

/// A suggestion response with no favourites.
pub fn response(general: &[(i64, &str)], conditional: &[(i64, &str)]) -> SuggestionResponse {
    SuggestionResponse {
        general_items: items(general),
        conditional_items: items(conditional),
        user_favorite_items: Vec::new(),
    }
}

/// A suggestion source that returns one scripted result and records the
/// climates it was asked for.
pub struct ScriptedSuggestions {
    result: Result<SuggestionResponse, ApiError>,
    requested: Mutex<Vec<Climate>>,
}

impl ScriptedSuggestions {
    pub fn new(response: SuggestionResponse) -> Self {
        Self {
            result: Ok(response),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            result: Err(error),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<Climate> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionSource for ScriptedSuggestions {
    async fn fetch_suggestions(&self, climate: Climate) -> Result<SuggestionResponse, ApiError> {
        self.requested.lock().unwrap().push(climate);
        self.result.clone()
    }
}

/// Every call the recording backend received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(NewPackingList),
    Attach(i64, ItemsPayload),
    Delete(i64),
}

/// A packing-list backend with scripted results that records every call.
pub struct RecordingApi {
    create: Result<CreatedList, ApiError>,
    attach: Result<Vec<SavedItem>, ApiError>,
    delete: Result<bool, ApiError>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingApi {
    /// A backend where every call succeeds and the list gets `list_id`.
    pub fn ok(list_id: i64) -> Self {
        Self {
            create: Ok(CreatedList {
                id: Some(list_id),
                title: None,
            }),
            attach: Ok(Vec::new()),
            delete: Ok(true),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_create(mut self, result: Result<CreatedList, ApiError>) -> Self {
        self.create = result;
        self
    }

    pub fn with_attach(mut self, result: Result<Vec<SavedItem>, ApiError>) -> Self {
        self.attach = result;
        self
    }

    pub fn with_delete(mut self, result: Result<bool, ApiError>) -> Self {
        self.delete = result;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackingListApi for RecordingApi {
    async fn create_list(&self, payload: &NewPackingList) -> Result<CreatedList, ApiError> {
        self.calls.lock().unwrap().push(Call::Create(payload.clone()));
        self.create.clone()
    }

    async fn attach_items(
        &self,
        list_id: i64,
        payload: &ItemsPayload,
    ) -> Result<Vec<SavedItem>, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Attach(list_id, payload.clone()));
        self.attach.clone()
    }

    async fn delete_list(&self, list_id: i64) -> Result<bool, ApiError> {
        self.calls.lock().unwrap().push(Call::Delete(list_id));
        self.delete.clone()
    }
}
