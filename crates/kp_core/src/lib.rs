//! kp_core: Core types, error kinds, and the lenient integer tokenizer.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! converter (`kp_io`, `kp_algo`, `kp_pipeline`, `kp_cli`).
//!
//! - Source instance (`Instance`, explicit item indices)
//! - Classic instance (`ClassicInstance`, positional items)
//! - Parsed solution (`Solution`, `SolutionEntry`)
//! - Verifier output (`ValidationResult`)
//! - Token parsing (`tokens::to_int`, `tokens::split_ints`)
//!
//! Serialization derives are gated behind `serde` feature.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors {
    use alloc::string::String;
    use core::fmt;

    /// Error kinds shared by every layer; the driver reports failures by kind.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub enum ErrorKind {
        /// Structural violation (line counts, tokens, headers).
        Format,
        /// Solution references an item index outside `[0, n)`.
        Index,
        /// Semantically invalid number (negative multiplicity, overflow).
        Value,
        /// (profit, weight) pair missing or exhausted.
        Lookup,
        /// Filesystem failure.
        Io,
    }

    impl fmt::Display for ErrorKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let s = match self {
                ErrorKind::Format => "format",
                ErrorKind::Index => "index",
                ErrorKind::Value => "value",
                ErrorKind::Lookup => "lookup",
                ErrorKind::Io => "io",
            };
            f.write_str(s)
        }
    }

    /// Structural errors raised while parsing any of the three text formats.
    ///
    /// Line numbers are 1-based positions in the sequence the parser walks
    /// (non-blank lines for source instances and solutions, raw lines for
    /// classic instances).
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum FormatError {
        /// Fewer than the two mandatory leading lines.
        TooShort { found: usize },
        /// Declared count needs more lines than the file has.
        CountMismatch { declared: i64, found: usize },
        /// Item line with too few tokens.
        BadItemLine { line: usize, content: String },
        /// Classic header without `n capacity`.
        BadHeader,
        /// Classic item line (1-based item number) without `profit weight`.
        BadClassicItem { item: usize },
        /// Token that is neither an integer nor a finite float.
        BadToken(String),
        /// `BadToken` located on a 1-based line of the file.
        BadTokenOnLine { line: usize, token: String },
        /// Declared count below zero.
        NegativeCount(i64),
    }

    impl FormatError {
        #[inline]
        pub fn kind(&self) -> ErrorKind {
            ErrorKind::Format
        }

        /// Attach a 1-based line number to a bare `BadToken`; other errors
        /// pass through.
        pub fn at_line(self, line: usize) -> Self {
            match self {
                FormatError::BadToken(token) => FormatError::BadTokenOnLine { line, token },
                other => other,
            }
        }
    }

    impl fmt::Display for FormatError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                FormatError::TooShort { found } => {
                    write!(f, "too short: {found} non-blank line(s)")
                }
                FormatError::CountMismatch { declared, found } => {
                    write!(f, "count mismatch: declared {declared}, lines={found}")
                }
                FormatError::BadItemLine { line, content } => {
                    write!(f, "bad item line {line}: '{content}'")
                }
                FormatError::BadHeader => write!(f, "bad header: expected 'n capacity'"),
                FormatError::BadClassicItem { item } => write!(f, "bad item line #{item}"),
                FormatError::BadToken(t) => write!(f, "bad token: '{t}'"),
                FormatError::BadTokenOnLine { line, token } => {
                    write!(f, "bad token on line {line}: '{token}'")
                }
                FormatError::NegativeCount(c) => write!(f, "negative count: {c}"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for FormatError {}
}

pub mod model;
pub mod tokens;

pub use errors::{ErrorKind, FormatError};
pub use model::{
    ClassicInstance, ClassicItem, Instance, Item, ItemOrder, Solution, SolutionEntry,
    ValidationResult,
};
