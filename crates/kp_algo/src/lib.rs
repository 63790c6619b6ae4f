// crates/kp_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Algorithm layer: reconcile a parsed solution with a classic instance.
//! Pure and I/O-free; parsing lives in `kp_io`, orchestration in `kp_pipeline`.

pub mod reconcile;

pub use reconcile::{expand_entries, validate_solution, ReconcileError};
