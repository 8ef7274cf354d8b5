//! Trip metadata and the request payloads derived from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::item::Item;

/// Destination and dates for one trip. Fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripContext {
    pub destination_city: String,
    pub destination_country: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,
}

impl TripContext {
    pub fn new(
        destination_city: impl Into<String>,
        destination_country: impl Into<String>,
        departure_date: NaiveDate,
        return_date: NaiveDate,
    ) -> Result<Self> {
        let destination_city: String = destination_city.into();
        let destination_country: String = destination_country.into();
        let trip = Self {
            destination_city: destination_city.trim().to_string(),
            destination_country: destination_country.trim().to_string(),
            departure_date,
            return_date,
            origin_country: None,
        };
        trip.validate()?;
        Ok(trip)
    }

    pub fn with_origin(mut self, origin_country: impl Into<String>) -> Self {
        self.origin_country = Some(origin_country.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.destination_city.is_empty() {
            return Err(Error::InvalidTrip("destination city is empty".into()));
        }
        if self.destination_country.is_empty() {
            return Err(Error::InvalidTrip("destination country is empty".into()));
        }
        if self.return_date < self.departure_date {
            return Err(Error::InvalidTrip(format!(
                "return date {} is before departure date {}",
                self.return_date, self.departure_date
            )));
        }
        Ok(())
    }

    pub fn title(&self) -> String {
        format!(
            "Packing list for {}, {}",
            self.destination_city, self.destination_country
        )
    }

    /// The body for `POST /packing_lists/`.
    pub fn creation_payload(&self, owner: i64) -> NewPackingList {
        NewPackingList {
            title: self.title(),
            departure_date: self.departure_date,
            return_date: self.return_date,
            destination_city: self.destination_city.clone(),
            destination_country: self.destination_country.clone(),
            origin_country: self.origin_country.clone(),
            owner,
        }
    }
}

/// Request body for list creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPackingList {
    pub title: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub destination_city: String,
    pub destination_country: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,

    pub owner: i64,
}

/// Request body for `POST /packing_lists/{id}/items/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsPayload {
    pub items: Vec<Item>,
}
