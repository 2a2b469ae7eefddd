use log::debug;

use crate::error::{Result, StylomError};
use crate::model::distance::{DistanceFormula, distance};
use crate::model::distribution::PercentDistribution;

/// One classification result: an author and their dissimilarity score
/// against the unknown document.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribution {
	pub author: String,
	pub score: f64,
}

/// Scores the unknown document against every author and returns the
/// full list sorted by ascending score (best match first).
///
/// The sort is stable, so authors with equal scores keep their input
/// order and the first-seen author wins ties.
///
/// # Errors
/// Returns `EmptyCorpus` when `profiles` is empty.
pub fn rank(
	unknown: &PercentDistribution,
	profiles: &[(String, PercentDistribution)],
	formula: DistanceFormula,
) -> Result<Vec<Attribution>> {
	if profiles.is_empty() {
		return Err(StylomError::EmptyCorpus);
	}

	let mut attributions: Vec<Attribution> = profiles
		.iter()
		.map(|(author, profile)| {
			let score = distance(profile, unknown, formula);
			debug!("distance to '{}': {:.6}", author, score);
			Attribution { author: author.clone(), score }
		})
		.collect();

	attributions.sort_by(|a, b| a.score.total_cmp(&b.score));
	Ok(attributions)
}

/// Returns the single best-matching author: the MINIMUM score, since
/// the distance measures dissimilarity.
pub fn best(
	unknown: &PercentDistribution,
	profiles: &[(String, PercentDistribution)],
	formula: DistanceFormula,
) -> Result<Attribution> {
	let mut ranked = rank(unknown, profiles, formula)?;
	// rank() errors on an empty corpus, so the list is non-empty here
	Ok(ranked.remove(0))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::distribution::TopK;
	use crate::model::frequency::{FrequencyTable, NgramOrder};

	fn dist(entries: &[(&str, u64)]) -> PercentDistribution {
		let mut table = FrequencyTable::new(NgramOrder::Unigram);
		for (gram, count) in entries {
			table.add_tokens(std::iter::repeat_n(gram.to_string(), *count as usize));
		}
		PercentDistribution::from_table(&table, TopK::All).unwrap()
	}

	#[test]
	fn picks_the_minimum_score() {
		let unknown = dist(&[("chat", 3), ("chien", 1)]);
		let profiles = vec![
			("loin".to_owned(), dist(&[("chat", 1), ("chien", 3)])),
			("proche".to_owned(), dist(&[("chat", 3), ("chien", 1)])),
		];

		let winner = best(&unknown, &profiles, DistanceFormula::SharedKeysOnly).unwrap();
		assert_eq!(winner.author, "proche");
		assert!(winner.score < 1e-9);
	}

	#[test]
	fn ranked_list_is_ascending() {
		let unknown = dist(&[("chat", 1), ("chien", 1)]);
		let profiles = vec![
			("a".to_owned(), dist(&[("chat", 9), ("chien", 1)])),
			("b".to_owned(), dist(&[("chat", 1), ("chien", 1)])),
			("c".to_owned(), dist(&[("chat", 2), ("chien", 1)])),
		];

		let ranked = rank(&unknown, &profiles, DistanceFormula::SharedKeysOnly).unwrap();
		assert_eq!(ranked[0].author, "b");
		for pair in ranked.windows(2) {
			assert!(pair[0].score <= pair[1].score);
		}
	}

	#[test]
	fn ties_keep_first_seen_author() {
		let unknown = dist(&[("chat", 1)]);
		// Both profiles share no key with the unknown document, so both
		// score 0 under the default formula.
		let profiles = vec![
			("premier".to_owned(), dist(&[("chien", 1)])),
			("second".to_owned(), dist(&[("cheval", 1)])),
		];

		let winner = best(&unknown, &profiles, DistanceFormula::SharedKeysOnly).unwrap();
		assert_eq!(winner.author, "premier");
	}

	#[test]
	fn empty_corpus_is_an_error() {
		let unknown = dist(&[("chat", 1)]);
		assert!(matches!(
			best(&unknown, &[], DistanceFormula::SharedKeysOnly),
			Err(StylomError::EmptyCorpus)
		));
	}

	#[test]
	fn classification_is_deterministic() {
		let unknown = dist(&[("chat", 2), ("chien", 3), ("rat", 1)]);
		let profiles = vec![
			("verne".to_owned(), dist(&[("chat", 5), ("rat", 2)])),
			("zola".to_owned(), dist(&[("chien", 4), ("rat", 1)])),
		];

		let first = best(&unknown, &profiles, DistanceFormula::SharedKeysOnly).unwrap();
		let second = best(&unknown, &profiles, DistanceFormula::SharedKeysOnly).unwrap();
		assert_eq!(first.author, second.author);
		assert_eq!(first.score, second.score);
	}
}
