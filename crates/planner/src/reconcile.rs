//! Reconciliation: linking working-list entries to their suggestion.
//!
//! For every working-list item whose name (ignoring case) appears in a
//! candidate pool, the item is marked suggested and takes the pool entry's
//! canonical id, and every pool entry with that name is dropped so the name
//! never sits in the list and a pool at the same time.
//!
//! The function is pure: it reads the current state and returns the next
//! one. Matches are decided first, then the new list and pools are built,
//! so nothing is mutated while it is being scanned.

use std::collections::{HashMap, HashSet};

use packed_core::{Item, ItemId};
use serde::Serialize;
use tracing::debug;

use crate::suggestions::{CandidatePools, PoolKind};
use crate::working_list::WorkingList;

/// One working-list entry that was linked to a pool entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Position of the entry in the working list
    pub index: usize,
    pub name: String,
    pub pool: PoolKind,
    /// Canonical id taken from the pool entry
    pub id: Option<ItemId>,
}

/// Output of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub list: WorkingList,
    pub pools: CandidatePools,
    pub matches: Vec<Match>,
}

impl Reconciliation {
    /// Whether this pass changed anything.
    pub fn changed(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Index pools by lowercased name, keeping the first occurrence.
/// The general pool is indexed before the conditional pool, so a name
/// present in both resolves to the general entry.
fn first_occurrences(pools: &CandidatePools) -> HashMap<String, (PoolKind, &Item)> {
    let mut index = HashMap::new();
    for kind in [PoolKind::General, PoolKind::Conditional] {
        for entry in pools.pool(kind) {
            index.entry(entry.name_key()).or_insert((kind, entry));
        }
    }
    index
}

/// Run one reconciliation pass over `list` and `pools`.
///
/// Every working-list entry with a pooled name is matched, so repeated
/// entries of one name all take the same canonical id.
pub fn reconcile(list: &WorkingList, pools: &CandidatePools) -> Reconciliation {
    let candidates = first_occurrences(pools);

    let mut claimed: HashSet<String> = HashSet::new();
    let mut matches = Vec::new();
    for (index, item) in list.iter().enumerate() {
        let key = item.name_key();
        if let Some((pool, entry)) = candidates.get(&key) {
            debug!(name = %item.name, pool = ?pool, id = ?entry.id, "Matched suggested item");
            matches.push(Match {
                index,
                name: item.name.clone(),
                pool: *pool,
                id: entry.id,
            });
            claimed.insert(key);
        }
    }

    if matches.is_empty() {
        return Reconciliation {
            list: list.clone(),
            pools: pools.clone(),
            matches,
        };
    }

    let keep = |entry: &&Item| !claimed.contains(&entry.name_key());
    let next_pools = CandidatePools {
        general: pools.general.iter().filter(keep).cloned().collect(),
        conditional: pools.conditional.iter().filter(keep).cloned().collect(),
    };

    let mut items = list.items().to_vec();
    for m in &matches {
        let item = &mut items[m.index];
        item.suggested = true;
        item.id = m.id;
    }

    Reconciliation {
        list: WorkingList::from_items(items),
        pools: next_pools,
        matches,
    }
}
