use std::collections::HashMap;

use crate::error::{Result, StylomError};
use crate::model::frequency::FrequencyTable;

/// Cap applied when normalizing a frequency table.
///
/// # Variants
/// - `All`: keep every gram.
/// - `Limit(k)`: keep the `k` most frequent grams; `k` larger than the
///   table is clamped to the table size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopK {
	All,
	Limit(usize),
}

/// A relative-frequency distribution over the top-K grams of a table.
///
/// Percentages are on the [0, 100] scale and are computed against the
/// total of the kept entries only, so they always sum to 100 over the
/// included keys regardless of the cap.
///
/// Entries are ordered by count descending; ties are broken by key
/// ascending. The ordering is the rank used by `nth` and `rank_of`.
#[derive(Clone, Debug)]
pub struct PercentDistribution {
	ranked: Vec<(String, f64)>,
	index: HashMap<String, f64>,
}

impl PercentDistribution {
	/// Normalizes a frequency table into a capped percentage distribution.
	///
	/// # Errors
	/// Returns `EmptyDistribution` when the top-K total is zero (empty
	/// table, or a zero cap), rather than dividing by zero.
	pub fn from_table(table: &FrequencyTable, top_k: TopK) -> Result<Self> {
		let mut ranked: Vec<(&str, u64)> = table.iter().collect();
		ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

		let cap = match top_k {
			TopK::All => ranked.len(),
			TopK::Limit(k) => k.min(ranked.len()),
		};
		ranked.truncate(cap);

		let total: u64 = ranked.iter().map(|(_, count)| count).sum();
		if total == 0 {
			return Err(StylomError::EmptyDistribution);
		}

		let ranked: Vec<(String, f64)> = ranked
			.into_iter()
			.map(|(gram, count)| (gram.to_owned(), count as f64 / total as f64 * 100.0))
			.collect();
		let index = ranked.iter().map(|(gram, pct)| (gram.clone(), *pct)).collect();

		Ok(Self { ranked, index })
	}

	/// Number of included grams.
	pub fn len(&self) -> usize {
		self.ranked.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ranked.is_empty()
	}

	/// Percentage of one gram, or `None` when it was not included.
	pub fn percent(&self, ngram: &str) -> Option<f64> {
		self.index.get(ngram).copied()
	}

	/// The `rank`-th most frequent gram, 1-based.
	pub fn nth(&self, rank: usize) -> Option<(&str, f64)> {
		if rank == 0 {
			return None;
		}
		self.ranked.get(rank - 1).map(|(gram, pct)| (gram.as_str(), *pct))
	}

	/// 1-based rank of a gram, or `None` when it was not included.
	pub fn rank_of(&self, ngram: &str) -> Option<usize> {
		self.ranked.iter().position(|(gram, _)| gram == ngram).map(|i| i + 1)
	}

	/// Iterates over `(gram, percent)` in rank order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.ranked.iter().map(|(gram, pct)| (gram.as_str(), *pct))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::frequency::NgramOrder;

	const EPSILON: f64 = 1e-9;

	fn table(entries: &[(&str, u64)]) -> FrequencyTable {
		let mut table = FrequencyTable::new(NgramOrder::Unigram);
		for (gram, count) in entries {
			table.add_tokens(std::iter::repeat_n(gram.to_string(), *count as usize));
		}
		table
	}

	#[test]
	fn uncapped_percentages_sum_to_one_hundred() {
		let table = table(&[("chat", 3), ("chien", 2), ("cheval", 5), ("oiseau", 7)]);
		let dist = PercentDistribution::from_table(&table, TopK::All).unwrap();
		let sum: f64 = dist.iter().map(|(_, pct)| pct).sum();
		assert!((sum - 100.0).abs() < EPSILON, "sum was {sum}");
	}

	#[test]
	fn capped_percentages_use_top_k_total() {
		// chat 6, chien 3, rat 1; top-2 total is 9
		let table = table(&[("chat", 6), ("chien", 3), ("rat", 1)]);
		let dist = PercentDistribution::from_table(&table, TopK::Limit(2)).unwrap();

		assert_eq!(dist.len(), 2);
		assert!(dist.percent("rat").is_none());
		assert!((dist.percent("chat").unwrap() - 600.0 / 9.0).abs() < EPSILON);
		assert!((dist.percent("chien").unwrap() - 300.0 / 9.0).abs() < EPSILON);
		let sum: f64 = dist.iter().map(|(_, pct)| pct).sum();
		assert!((sum - 100.0).abs() < EPSILON);
	}

	#[test]
	fn cap_larger_than_table_is_clamped() {
		let table = table(&[("chat", 1), ("chien", 1)]);
		let dist = PercentDistribution::from_table(&table, TopK::Limit(300)).unwrap();
		assert_eq!(dist.len(), 2);
	}

	#[test]
	fn ranking_is_count_descending_then_key_ascending() {
		let table = table(&[("zebre", 2), ("ane", 2), ("chat", 5)]);
		let dist = PercentDistribution::from_table(&table, TopK::All).unwrap();

		assert_eq!(dist.nth(1).unwrap().0, "chat");
		assert_eq!(dist.nth(2).unwrap().0, "ane");
		assert_eq!(dist.nth(3).unwrap().0, "zebre");
		assert_eq!(dist.rank_of("zebre"), Some(3));
		assert_eq!(dist.nth(4), None);
		assert_eq!(dist.nth(0), None);
	}

	#[test]
	fn empty_table_fails_instead_of_dividing_by_zero() {
		let empty = FrequencyTable::new(NgramOrder::Unigram);
		assert!(matches!(
			PercentDistribution::from_table(&empty, TopK::All),
			Err(StylomError::EmptyDistribution)
		));
	}

	#[test]
	fn zero_cap_fails_like_an_empty_table() {
		let table = table(&[("chat", 4)]);
		assert!(matches!(
			PercentDistribution::from_table(&table, TopK::Limit(0)),
			Err(StylomError::EmptyDistribution)
		));
	}
}
