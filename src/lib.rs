// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Combinatorial elimination and coverage over lottery draw histories.
//!
//! The candidate space for a k-of-n game (13,983,816 combinations for
//! 6-of-49) is never stored. It is addressed by lexicographic rank, and the
//! only large structure is a bitset with one bit per rank.
//!
//! # Architecture
//!
//! Data flows leaves first:
//!
//! 1. [`draws`] parses historical draw lines into sorted [`Combination`]s,
//!    skipping malformed lines with a counted warning
//! 2. [`engine`] applies each draw to an accumulating set: full-space
//!    elimination at a target distance, or sub-combination coverage
//! 3. the engine is consumed into a read-only [`Finalized`] set
//! 4. [`report`] walks the complement lazily and writes it through [`codec`]
//!
//! [`combo`] provides the universe (enumeration, rank and unrank) that every
//! other layer addresses combinations through.
//!
//! # Parallelism
//!
//! Elimination partitions the rank space into chunks scanned by rayon
//! workers. Each worker batches matching ranks locally and merges them into
//! the shared atomic bitset; a [`CancelToken`] is checked between chunks and
//! after every merge.

pub mod codec;
pub mod combo;
pub mod config;
pub mod draws;
pub mod engine;
pub mod error;
pub mod report;

// Re-export commonly used types
pub use codec::Format;
pub use combo::{Combination, Universe};
pub use config::{Game, ScanConfig};
pub use draws::{DrawLoader, DrawRecord, LineFormat};
pub use engine::{CancelToken, CoverageEngine, EliminationEngine, Finalized};
pub use error::{Error, Result};
