//! The working list: what the user intends to pack, in insertion order.

use packed_core::{Item, ItemsPayload, Quantity};
use serde::{Deserialize, Serialize};

/// Ordered collection of items the user intends to pack.
///
/// Lookups by name here are exact (case-sensitive). Case-insensitive
/// identity is the business of reconciliation and of the session's
/// duplicate guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingList {
    items: Vec<Item>,
}

impl WorkingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Append an item. The quantity is always reset to 1; no duplicate check.
    pub fn add(&mut self, mut item: Item) {
        item.quantity = Quantity::ONE;
        self.items.push(item);
    }

    /// Index of the first item whose name is exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.position(name).map(|idx| &self.items[idx])
    }

    /// Whether any item has this name, ignoring case.
    pub fn contains_name(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.same_name(name))
    }

    /// Remove the first item named exactly `name`. Returns `None` and leaves
    /// the list untouched when there is no such item.
    pub fn remove(&mut self, name: &str) -> Option<Item> {
        let idx = self.position(name)?;
        Some(self.items.remove(idx))
    }

    /// Overwrite the quantity of the first item named exactly `name`.
    /// Returns `false` on a lookup miss.
    pub fn set_quantity(&mut self, name: &str, quantity: Quantity) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.items[idx].quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Body for the items endpoint.
    pub fn to_payload(&self) -> ItemsPayload {
        ItemsPayload {
            items: self.items.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a WorkingList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &WorkingList) -> Vec<&str> {
        list.iter().map(|i| i.name.as_str()).collect()
    }

    fn list_of(names: &[&str]) -> WorkingList {
        let mut list = WorkingList::new();
        for name in names {
            list.add(Item::custom(*name));
        }
        list
    }

    #[test]
    fn add_forces_quantity_one() {
        let mut list = WorkingList::new();
        list.add(Item::custom("Socks").with_quantity(Quantity::new(12).unwrap()));
        assert_eq!(list.items()[0].quantity, Quantity::ONE);
    }

    #[test]
    fn add_keeps_insertion_order_and_allows_duplicates() {
        let list = list_of(&["Hat", "Boots", "Hat"]);
        assert_eq!(names(&list), vec!["Hat", "Boots", "Hat"]);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut list = list_of(&["Hat", "Umbrella", "Boots"]);
        let removed = list.remove("Umbrella").unwrap();
        assert_eq!(removed.name, "Umbrella");
        assert_eq!(names(&list), vec!["Hat", "Boots"]);
    }

    #[test]
    fn remove_only_first_match() {
        let mut list = list_of(&["Hat", "Scarf", "Hat"]);
        list.remove("Hat");
        assert_eq!(names(&list), vec!["Scarf", "Hat"]);
    }

    #[test]
    fn remove_is_case_sensitive_and_missing_is_noop() {
        let mut list = list_of(&["Hat", "Boots"]);
        let before = list.clone();
        assert!(list.remove("hat").is_none());
        assert!(list.remove("Gloves").is_none());
        assert_eq!(list, before);
    }

    #[test]
    fn set_quantity_touches_only_target() {
        let mut list = list_of(&["Passport", "Sunscreen", "Charger"]);
        assert!(list.set_quantity("Sunscreen", Quantity::new(5).unwrap()));
        assert_eq!(list.get("Sunscreen").unwrap().quantity.get(), 5);
        assert_eq!(list.get("Passport").unwrap().quantity, Quantity::ONE);
        assert_eq!(list.get("Charger").unwrap().quantity, Quantity::ONE);
        assert_eq!(names(&list), vec!["Passport", "Sunscreen", "Charger"]);
    }

    #[test]
    fn set_quantity_miss_is_noop() {
        let mut list = list_of(&["Passport"]);
        let before = list.clone();
        assert!(!list.set_quantity("Visa", Quantity::new(2).unwrap()));
        assert_eq!(list, before);
    }

    #[test]
    fn contains_name_ignores_case() {
        let list = list_of(&["Sunscreen"]);
        assert!(list.contains_name("SUNSCREEN"));
        assert!(list.get("sunscreen").is_none());
    }

    #[test]
    fn payload_wraps_items() {
        let list = list_of(&["Passport"]);
        let json = serde_json::to_value(list.to_payload()).unwrap();
        assert_eq!(json["items"][0]["name"], "Passport");
        assert_eq!(json["items"][0]["quantity"], 1);
    }
}
