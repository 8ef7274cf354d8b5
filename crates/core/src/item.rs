//! Item and quantity value types.
//!
//! An [`Item`] is the unit that flows through the whole planner: the
//! suggestion endpoint hands out items, the user adds their own, and the
//! working list is submitted as a sequence of items.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Canonical identifier assigned by the suggestion source or the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many of an item to pack. Always within `[1, 1000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 1000;

    /// The quantity every freshly added item starts with.
    pub const ONE: Quantity = Quantity(1);

    pub fn new(value: u32) -> Result<Self, Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidQuantity {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A thing to pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Canonical id; `None` for user-typed items until reconciled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,

    /// Display name, compared case-insensitively for identity
    pub name: String,

    #[serde(default)]
    pub quantity: Quantity,

    /// Set once the item has been matched against a suggestion pool
    #[serde(default)]
    pub suggested: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub packed: bool,
}

impl Item {
    /// A user-typed item with no canonical id.
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity: Quantity::ONE,
            suggested: false,
            packed: false,
        }
    }

    /// An item as handed out by the suggestion source.
    pub fn suggestion(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(ItemId(id)),
            ..Self::custom(name)
        }
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    /// The deduplication key: the lowercased name.
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-insensitive name comparison.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }

    pub fn display_name(&self) -> String {
        if self.suggested {
            format!("{} (suggested)", self.name)
        } else {
            self.name.clone()
        }
    }
}
