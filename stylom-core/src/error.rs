use thiserror::Error;

use crate::model::frequency::NgramOrder;

/// Errors produced by the profiling, classification and generation paths.
///
/// Every variant is local to a single operation (one document, one
/// classification call); batch callers are expected to collect failures
/// per author and keep going rather than abort the whole run.
#[derive(Error, Debug)]
pub enum StylomError {
	/// The classifier was invoked with zero author profiles.
	#[error("no author profiles supplied")]
	EmptyCorpus,

	/// Normalization found a top-K total of zero (empty document or table).
	#[error("cannot normalize an empty frequency table")]
	EmptyDistribution,

	/// Two tables of different n-gram order were merged.
	#[error("n-gram order mismatch: {left:?} vs {right:?}")]
	OrderMismatch { left: NgramOrder, right: NgramOrder },

	/// An analysis mode other than 1 (unigrams) or 2 (bigrams).
	#[error("unsupported n-gram mode {0}, expected 1 or 2")]
	UnsupportedMode(u8),

	/// Malformed or missing corpus input.
	#[error("corpus input error: {0}")]
	Io(#[from] std::io::Error),

	/// Profile cache serialization failure.
	#[error("profile cache error: {0}")]
	Codec(#[from] postcard::Error),
}

pub type Result<T> = std::result::Result<T, StylomError>;
