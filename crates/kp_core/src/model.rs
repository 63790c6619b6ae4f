//! Instance, solution, and verification record types.
//!
//! Values are built once by a parser and never mutated afterwards; every
//! transformation (re-ordering, classic rendering) produces a new value.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One item of a source (Jooken/Pisinger) instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Index exactly as declared in the source file.
    pub original_index: i64,
    pub profit: i64,
    pub weight: i64,
}

/// Source instance. Invariant: `items.len() == n`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instance {
    pub n: usize,
    pub capacity: i64,
    pub items: Vec<Item>,
}

/// Item order used when emitting a classic instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ItemOrder {
    /// Source file order.
    #[default]
    AsRead,
    /// Ascending `original_index`; ties keep source order.
    ByOriginalIndex,
}

impl Instance {
    /// Build an instance whose `n` is taken from `items`.
    pub fn new(capacity: i64, items: Vec<Item>) -> Self {
        Self { n: items.len(), capacity, items }
    }

    /// Items in the requested order (stable sort for `ByOriginalIndex`).
    pub fn ordered_items(&self, order: ItemOrder) -> Vec<Item> {
        let mut out = self.items.clone();
        if order == ItemOrder::ByOriginalIndex {
            out.sort_by_key(|it| it.original_index);
        }
        out
    }
}

/// Positional item of a classic instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassicItem {
    pub profit: i64,
    pub weight: i64,
}

/// Classic instance; an item's index is its offset in `items`.
/// Invariant: `items.len() == n`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassicInstance {
    pub n: usize,
    pub capacity: i64,
    pub items: Vec<ClassicItem>,
}

impl From<&Instance> for ClassicInstance {
    /// Drop explicit indices, keeping source order.
    fn from(inst: &Instance) -> Self {
        Self {
            n: inst.n,
            capacity: inst.capacity,
            items: inst
                .items
                .iter()
                .map(|it| ClassicItem { profit: it.profit, weight: it.weight })
                .collect(),
        }
    }
}

/// One item line of a solution file, after disambiguation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolutionEntry {
    /// `idx` (multiplicity 1).
    IndexOnly(i64),
    /// `idx mult`.
    IndexWithMultiplicity(i64, i64),
    /// `profit weight`.
    ProfitWeight(i64, i64),
}

/// Parsed solution file: declared total value plus item entries in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    pub declared_value: i64,
    pub entries: Vec<SolutionEntry>,
}

/// Verifier output for one (instance, solution) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationResult {
    pub declared_value: i64,
    pub recomputed_value: i64,
    pub total_weight: i64,
    pub capacity: i64,
    /// `total_weight <= capacity`
    pub feasible: bool,
    /// `recomputed_value == declared_value`
    pub value_match: bool,
    pub num_items_selected: usize,
}
