/// Punctuation characters stripped by default, taken from the corpus
/// the profiles are built on (French literature with guillemets).
pub const PUNCTUATION: &[char] = &[
	'!', '"', '\'', ')', '(', ',', '.', ';', ':', '?', '-', '_', '«', '»',
];

/// How punctuation is treated while splitting a line into words.
///
/// # Variants
/// - `Strip`: punctuation characters act as separators, like whitespace.
/// - `Keep`: only whitespace separates words; punctuation survives as
///   part of the surrounding token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PunctuationMode {
	Strip,
	Keep,
}

/// Tokenization policy applied to every line of a document.
///
/// A policy is a pure value: tokenizing the same line with the same
/// policy always yields the same tokens.
///
/// # Invariants
/// - Tokens are always lowercased.
/// - Fragments shorter than `min_len` characters are discarded.
#[derive(Clone, Debug)]
pub struct TokenPolicy {
	/// Strip or keep punctuation (see `PunctuationMode`).
	pub mode: PunctuationMode,

	/// Minimum token length in characters; shorter fragments are dropped.
	pub min_len: usize,

	/// Also split on `-`, turning hyphenated compounds into two tokens.
	/// Off by default. Only meaningful in `Keep` mode since `Strip`
	/// already treats the hyphen as punctuation.
	pub split_hyphens: bool,

	/// Characters treated as separators in `Strip` mode.
	pub strip_class: Vec<char>,
}

impl Default for TokenPolicy {
	fn default() -> Self {
		Self {
			mode: PunctuationMode::Strip,
			min_len: 3,
			split_hyphens: false,
			strip_class: PUNCTUATION.to_vec(),
		}
	}
}

impl TokenPolicy {
	/// Policy that keeps punctuation attached to words (whitespace-only split).
	pub fn keep_punctuation() -> Self {
		Self { mode: PunctuationMode::Keep, ..Self::default() }
	}

	/// Whether `c` separates two tokens under this policy.
	fn is_separator(&self, c: char) -> bool {
		if c.is_whitespace() {
			return true;
		}
		if self.split_hyphens && c == '-' {
			return true;
		}
		match self.mode {
			PunctuationMode::Strip => self.strip_class.contains(&c),
			PunctuationMode::Keep => false,
		}
	}
}

/// Splits one line of raw text into normalized word tokens.
///
/// The returned iterator is lazy and borrows both the line and the
/// policy; it can be rebuilt per line at no cost.
///
/// # Behavior
/// - Splits on the policy's separator set, discarding empty fragments.
/// - Lowercases every fragment.
/// - Drops fragments shorter than `policy.min_len` characters
///   (counted in chars so accented words are measured correctly).
pub fn tokenize<'a>(line: &'a str, policy: &'a TokenPolicy) -> impl Iterator<Item = String> + 'a {
	line.split(move |c: char| policy.is_separator(c))
		.filter(|fragment| !fragment.is_empty())
		.map(|fragment| fragment.to_lowercase())
		.filter(move |token| token.chars().count() >= policy.min_len)
}
