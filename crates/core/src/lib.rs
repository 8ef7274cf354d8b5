//! # Packed Core
//!
//! Domain types, service traits, and error definitions for the Packed
//! travel-packing planner. This crate performs **no I/O**; it defines the
//! model that the planner, the HTTP client, and the CLI all build against.
//!
//! External collaborators are traits here; `packed-client` implements them
//! over HTTP and the planner tests implement them with scripted mocks.

pub mod api;
pub mod auth;
pub mod climate;
pub mod error;
pub mod item;
pub mod trip;

// Re-export key types at crate root for ergonomics
pub use api::{
    CreatedList, PackingListApi, PackingListSummary, SavedItem, SuggestionResponse,
    SuggestionSource,
};
pub use auth::AuthContext;
pub use climate::{Climate, WeatherReading};
pub use error::{ApiError, Error, Result, SubmissionError};
pub use item::{Item, ItemId, Quantity};
pub use trip::{ItemsPayload, NewPackingList, TripContext};
