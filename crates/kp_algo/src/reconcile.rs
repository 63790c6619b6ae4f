//! Solution reconciliation (deterministic; integers only).
//!
//! Contract:
//! - `IndexOnly(i)` / `IndexWithMultiplicity(i, m)`: `i` must lie in `[0, n)`,
//!   `m` must be non-negative; `i` is selected `m` times (`m = 1` for `IndexOnly`).
//! - `ProfitWeight(p, w)`: consumes the lowest not-yet-consumed item index with
//!   exactly that pair. Each physical item is consumed at most once through
//!   this path; index entries never consume from the pair pool.
//! - Value and weight are summed over the expanded selection; the first
//!   inconsistency aborts the whole reconciliation.

use std::collections::{BTreeMap, VecDeque};

use kp_core::{ClassicInstance, ClassicItem, ErrorKind, Solution, SolutionEntry, ValidationResult};
use thiserror::Error;

/// Reconciliation failures. All of them abort validation of the file.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("index out of range: {index} (n={n})")]
    IndexOutOfRange { index: i64, n: usize },

    #[error("negative multiplicity {multiplicity} for index {index}")]
    NegativeMultiplicity { index: i64, multiplicity: i64 },

    #[error("item (p={profit}, w={weight}) not found or no unused copy left")]
    PairUnavailable { profit: i64, weight: i64 },

    #[error("overflow while accumulating {what}")]
    Overflow { what: &'static str },
}

impl ReconcileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReconcileError::IndexOutOfRange { .. } => ErrorKind::Index,
            ReconcileError::NegativeMultiplicity { .. } | ReconcileError::Overflow { .. } => {
                ErrorKind::Value
            }
            ReconcileError::PairUnavailable { .. } => ErrorKind::Lookup,
        }
    }
}

/// FIFO queues of item indices per (profit, weight), ascending index.
struct PairPool {
    queues: BTreeMap<ClassicItem, VecDeque<usize>>,
}

impl PairPool {
    fn new(items: &[ClassicItem]) -> Self {
        let mut queues: BTreeMap<ClassicItem, VecDeque<usize>> = BTreeMap::new();
        for (idx, item) in items.iter().enumerate() {
            queues.entry(*item).or_default().push_back(idx);
        }
        Self { queues }
    }

    fn take(&mut self, profit: i64, weight: i64) -> Option<usize> {
        self.queues.get_mut(&ClassicItem { profit, weight })?.pop_front()
    }
}

/// Expand `entries` into the flat list of selected item indices (file order).
pub fn expand_entries(
    inst: &ClassicInstance,
    entries: &[SolutionEntry],
) -> Result<Vec<usize>, ReconcileError> {
    // Positional lookup covers exactly the items present (== n by invariant).
    let n = inst.items.len();
    let mut pool = PairPool::new(&inst.items);
    let mut chosen: Vec<usize> = Vec::with_capacity(entries.len());

    for entry in entries {
        match *entry {
            SolutionEntry::IndexOnly(index) => {
                chosen.push(checked_index(index, n)?);
            }
            SolutionEntry::IndexWithMultiplicity(index, multiplicity) => {
                let idx = checked_index(index, n)?;
                let m = usize::try_from(multiplicity)
                    .map_err(|_| ReconcileError::NegativeMultiplicity { index, multiplicity })?;
                chosen
                    .try_reserve(m)
                    .map_err(|_| ReconcileError::Overflow { what: "selection size" })?;
                chosen.extend(std::iter::repeat(idx).take(m));
            }
            SolutionEntry::ProfitWeight(profit, weight) => {
                let idx = pool
                    .take(profit, weight)
                    .ok_or(ReconcileError::PairUnavailable { profit, weight })?;
                chosen.push(idx);
            }
        }
    }
    Ok(chosen)
}

#[inline]
fn checked_index(index: i64, n: usize) -> Result<usize, ReconcileError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < n)
        .ok_or(ReconcileError::IndexOutOfRange { index, n })
}

/// Reconcile `sol` against `inst` and recompute value, weight and feasibility.
pub fn validate_solution(
    inst: &ClassicInstance,
    sol: &Solution,
) -> Result<ValidationResult, ReconcileError> {
    let chosen = expand_entries(inst, &sol.entries)?;

    let mut value: i64 = 0;
    let mut weight: i64 = 0;
    for &idx in &chosen {
        let item = inst.items[idx];
        value = value
            .checked_add(item.profit)
            .ok_or(ReconcileError::Overflow { what: "value" })?;
        weight = weight
            .checked_add(item.weight)
            .ok_or(ReconcileError::Overflow { what: "weight" })?;
    }

    Ok(ValidationResult {
        declared_value: sol.declared_value,
        recomputed_value: value,
        total_weight: weight,
        capacity: inst.capacity,
        feasible: weight <= inst.capacity,
        value_match: value == sol.declared_value,
        num_items_selected: chosen.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use SolutionEntry::*;

    fn classic(capacity: i64, pairs: &[(i64, i64)]) -> ClassicInstance {
        ClassicInstance {
            n: pairs.len(),
            capacity,
            items: pairs.iter().map(|&(profit, weight)| ClassicItem { profit, weight }).collect(),
        }
    }

    fn three_items() -> ClassicInstance {
        classic(10, &[(6, 5), (10, 4), (3, 2)])
    }

    fn sol(declared_value: i64, entries: Vec<SolutionEntry>) -> Solution {
        Solution { declared_value, entries }
    }

    #[test]
    fn feasible_and_matching() {
        let r = validate_solution(&three_items(), &sol(13, vec![IndexOnly(1), IndexOnly(2)])).unwrap();
        assert_eq!(r.recomputed_value, 13);
        assert_eq!(r.total_weight, 6);
        assert_eq!(r.capacity, 10);
        assert!(r.feasible);
        assert!(r.value_match);
        assert_eq!(r.num_items_selected, 2);
    }

    #[test]
    fn infeasible_still_recomputes() {
        let entries = vec![IndexOnly(0), IndexOnly(1), IndexOnly(2)];
        let r = validate_solution(&three_items(), &sol(19, entries)).unwrap();
        assert_eq!(r.recomputed_value, 19);
        assert_eq!(r.total_weight, 11);
        assert!(!r.feasible);
        assert!(r.value_match);
    }

    #[test]
    fn value_mismatch_is_reported_not_raised() {
        let r = validate_solution(&three_items(), &sol(100, vec![IndexOnly(0)])).unwrap();
        assert!(!r.value_match);
        assert!(r.feasible);
    }

    #[test]
    fn out_of_range_index() {
        let err = validate_solution(&three_items(), &sol(0, vec![IndexOnly(3)])).unwrap_err();
        assert_eq!(err, ReconcileError::IndexOutOfRange { index: 3, n: 3 });
        assert_eq!(err.kind(), ErrorKind::Index);
        let err = validate_solution(&three_items(), &sol(0, vec![IndexOnly(-1)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Index);
    }

    #[test]
    fn missing_pair() {
        let err = validate_solution(&three_items(), &sol(7, vec![ProfitWeight(7, 4)])).unwrap_err();
        assert_eq!(err, ReconcileError::PairUnavailable { profit: 7, weight: 4 });
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn duplicate_pairs_consume_distinct_items_in_index_order() {
        let inst = classic(100, &[(1, 1), (2, 2), (10, 4), (3, 3), (4, 4), (10, 4)]);
        let entries = vec![ProfitWeight(10, 4), ProfitWeight(10, 4)];
        assert_eq!(expand_entries(&inst, &entries).unwrap(), vec![2, 5]);

        let r = validate_solution(&inst, &sol(20, entries)).unwrap();
        assert_eq!(r.total_weight, 8);
        assert!(r.value_match);
    }

    #[test]
    fn pair_pool_exhaustion_is_lookup_error() {
        let inst = classic(100, &[(10, 4), (10, 4)]);
        let entries = vec![ProfitWeight(10, 4), ProfitWeight(10, 4), ProfitWeight(10, 4)];
        let err = expand_entries(&inst, &entries).unwrap_err();
        assert_eq!(err, ReconcileError::PairUnavailable { profit: 10, weight: 4 });
    }

    #[test]
    fn multiplicity_repeats_and_zero_selects_nothing() {
        let inst = three_items();
        let chosen = expand_entries(&inst, &[IndexWithMultiplicity(2, 3), IndexWithMultiplicity(0, 0)]).unwrap();
        assert_eq!(chosen, vec![2, 2, 2]);
    }

    #[test]
    fn negative_multiplicity_is_value_error() {
        let err = expand_entries(&three_items(), &[IndexWithMultiplicity(1, -2)]).unwrap_err();
        assert_eq!(err, ReconcileError::NegativeMultiplicity { index: 1, multiplicity: -2 });
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn range_is_checked_before_multiplicity() {
        let err = expand_entries(&three_items(), &[IndexWithMultiplicity(9, -2)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Index);
    }

    #[test]
    fn overflow_is_reported() {
        let inst = classic(0, &[(i64::MAX, 0)]);
        let err = validate_solution(&inst, &sol(0, vec![IndexWithMultiplicity(0, 2)])).unwrap_err();
        assert_eq!(err, ReconcileError::Overflow { what: "value" });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_pair_lookup_matches_index_lookup(
            pairs in prop::collection::vec((0i64..4, 0i64..4), 1..30),
            picks in prop::collection::vec(0usize..30, 0..30),
        ) {
            let inst = classic(1_000, &pairs);
            let mut seen = std::collections::BTreeSet::new();
            let picked: Vec<usize> = picks.into_iter().map(|p| p % pairs.len()).filter(|p| seen.insert(*p)).collect();

            let by_index: Vec<SolutionEntry> = picked.iter().map(|&i| IndexOnly(i as i64)).collect();
            let by_pair: Vec<SolutionEntry> = picked.iter().map(|&i| ProfitWeight(pairs[i].0, pairs[i].1)).collect();

            let a = validate_solution(&inst, &sol(0, by_index)).unwrap();
            let b = validate_solution(&inst, &sol(0, by_pair)).unwrap();
            prop_assert_eq!(a.recomputed_value, b.recomputed_value);
            prop_assert_eq!(a.total_weight, b.total_weight);
            prop_assert_eq!(a.num_items_selected, b.num_items_selected);
        }
    }
}
