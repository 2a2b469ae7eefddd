use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::distribution::{PercentDistribution, TopK};
use crate::model::frequency::{FrequencyTable, NgramOrder};
use crate::tokenizer::{TokenPolicy, tokenize};

/// One author's aggregated n-gram profile over all their documents.
///
/// # Responsibilities
/// - Accumulate per-document frequency tables into a single table
/// - Expose the aggregate for normalization and generation
///
/// # Invariants
/// - All merged documents share the profile's n-gram order
/// - The table is never mutated once normalization begins
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthorProfile {
	author: String,
	table: FrequencyTable,
}

impl AuthorProfile {
	/// Creates an empty profile for `author`.
	pub fn new(author: &str, order: NgramOrder) -> Self {
		Self { author: author.to_owned(), table: FrequencyTable::new(order) }
	}

	pub fn author(&self) -> &str {
		&self.author
	}

	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	/// Merges one document's table into the profile.
	///
	/// # Errors
	/// Returns `OrderMismatch` if the document was counted with a
	/// different n-gram order.
	pub fn add_document(&mut self, document: &FrequencyTable) -> Result<()> {
		self.table.merge(document)
	}

	/// Builds a profile by merging pre-counted per-document tables.
	///
	/// Merge order does not affect the result.
	pub fn from_documents(
		author: &str,
		order: NgramOrder,
		documents: &[FrequencyTable],
	) -> Result<Self> {
		let mut profile = Self::new(author, order);
		for document in documents {
			profile.add_document(document)?;
		}
		Ok(profile)
	}

	/// Scans raw documents (line sequences) into a profile, counting
	/// documents in parallel and merging single-threaded.
	///
	/// # Behavior
	/// - Splits the document list into one chunk per available core.
	/// - Each worker builds one table per document, so no table is ever
	///   shared between threads.
	/// - The main thread merges tables as they arrive.
	///
	/// # Errors
	/// Returns the first merge failure, which cannot happen as long as
	/// every worker counts with the same `order`.
	pub fn scan_documents(
		author: &str,
		documents: Vec<Vec<String>>,
		policy: &TokenPolicy,
		order: NgramOrder,
	) -> Result<Self> {
		let mut profile = Self::new(author, order);
		if documents.is_empty() {
			return Ok(profile);
		}

		let cpus = num_cpus::get().max(1);
		let chunk_size = documents.len().div_ceil(cpus).max(1);

		let (tx, rx) = mpsc::channel();
		for chunk in documents.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<Vec<String>> = chunk.to_vec();
			let policy = policy.clone();

			thread::spawn(move || {
				for document in chunk {
					let mut table = FrequencyTable::new(order);
					for line in &document {
						table.add_tokens(tokenize(line, &policy));
					}
					tx.send(table).expect("Failed to send from thread");
				}
			});
		}
		drop(tx);

		for table in rx.iter() {
			profile.table.merge(&table)?;
		}

		debug!(
			"scanned {} for author '{}': {} distinct grams",
			match order { NgramOrder::Unigram => "unigrams", NgramOrder::Bigram => "bigrams" },
			author,
			profile.table.len()
		);
		Ok(profile)
	}

	/// Normalizes the profile into a top-K percentage distribution.
	pub fn to_percent(&self, top_k: TopK) -> Result<PercentDistribution> {
		PercentDistribution::from_table(&self.table, top_k)
	}
}

/// Scans a whole corpus of `(author, documents)` pairs.
///
/// One author failing never aborts the batch: failures are collected as
/// `(author, error)` pairs and returned alongside the profiles that did
/// build. Author order is preserved.
pub fn scan_corpus(
	corpus: Vec<(String, Vec<Vec<String>>)>,
	policy: &TokenPolicy,
	order: NgramOrder,
) -> (Vec<AuthorProfile>, Vec<(String, crate::StylomError)>) {
	let mut profiles = Vec::new();
	let mut failures = Vec::new();

	for (author, documents) in corpus {
		match AuthorProfile::scan_documents(&author, documents, policy, order) {
			Ok(profile) => {
				info!("profile built for '{}'", author);
				profiles.push(profile);
			}
			Err(error) => {
				warn!("skipping author '{}': {}", author, error);
				failures.push((author, error));
			}
		}
	}

	(profiles, failures)
}
