//! N-gram author profiling and text generation library.
//!
//! This crate provides the building blocks of a small stylometry pipeline:
//! - Word tokenization with a configurable punctuation policy
//! - Unigram/bigram frequency tables and per-author aggregation
//! - Top-K percentage distributions and distance scoring
//! - Author attribution over a set of profiles
//! - Weighted-random (Markov) text generation with an injectable RNG
//!
//! The crate is a library, not a service: callers supply already-read
//! documents (line sequences) and receive plain values back. File
//! enumeration and argument handling belong to the front-end.

/// Frequency tables, author profiles, distributions, classification
/// and text generation.
pub mod model;

/// Line-level word tokenization with punctuation policies.
pub mod tokenizer;

/// I/O helpers (text reading, generated-text writing, profile cache).
pub mod io;

/// Error taxonomy shared across the crate.
pub mod error;

pub use error::{Result, StylomError};
