//! Top-level module for the profiling and generation pipeline.
//!
//! The pipeline, in dependency order:
//! - N-gram frequency tables (`frequency`)
//! - Per-author aggregation (`profile`)
//! - Top-K percentage distributions (`distribution`)
//! - Distance scoring between distributions (`distance`)
//! - Author attribution (`classifier`)
//! - Weighted-random text generation (`generator`)

/// Unigram/bigram frequency tables and their merge semantics.
pub mod frequency;

/// Author profiles aggregating per-document tables, with an optional
/// parallel scanning path.
pub mod profile;

/// Relative-frequency distributions capped to the top-K grams.
pub mod distribution;

/// Dissimilarity scoring between two distributions.
pub mod distance;

/// Best-match author attribution over a set of profiles.
pub mod classifier;

/// Transition graph and weighted-random text generation.
pub mod generator;
