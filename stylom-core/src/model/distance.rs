use crate::model::distribution::PercentDistribution;

/// Which grams contribute to the dissimilarity sum.
///
/// # Variants
/// - `SharedKeysOnly`: only grams present in both distributions are
///   compared; one-sided grams are ignored. This is the default, with
///   the documented consequence that two distributions sharing no key
///   score 0.
/// - `PenalizeAuthorOnly`: grams present only on the author side add
///   their full squared percentage to the sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceFormula {
	#[default]
	SharedKeysOnly,
	PenalizeAuthorOnly,
}

/// Computes the dissimilarity between an author distribution and an
/// unknown document's distribution.
///
/// The score is the root of the sum of squared percentage differences
/// over the grams selected by `formula`. Lower means more similar;
/// identical distributions score 0.
pub fn distance(
	author: &PercentDistribution,
	unknown: &PercentDistribution,
	formula: DistanceFormula,
) -> f64 {
	let mut sum = 0.0;
	for (gram, author_pct) in author.iter() {
		match unknown.percent(gram) {
			Some(unknown_pct) => {
				let delta = author_pct - unknown_pct;
				sum += delta * delta;
			}
			None => {
				if formula == DistanceFormula::PenalizeAuthorOnly {
					sum += author_pct * author_pct;
				}
			}
		}
	}
	sum.sqrt()
}
