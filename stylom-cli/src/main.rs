use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, warn};

use stylom_core::io::{list_dirs, list_files, load_profiles, read_lines, save_profiles, write_generated};
use stylom_core::model::classifier;
use stylom_core::model::distance::DistanceFormula;
use stylom_core::model::distribution::{PercentDistribution, TopK};
use stylom_core::model::frequency::{FrequencyTable, NgramOrder};
use stylom_core::model::generator::{GenerationInput, TextGenerator};
use stylom_core::model::profile::{AuthorProfile, scan_corpus};
use stylom_core::tokenizer::{TokenPolicy, tokenize};

/// Word-frequency analysis of author corpora: n-gram profiling, author
/// attribution and pseudo-random text generation.
///
/// The corpus directory holds one subdirectory per author, each filled
/// with plain-text `.txt` works.
#[derive(Parser, Debug)]
#[command(name = "stylom")]
struct Args {
	/// Corpus root: one subdirectory per author
	#[arg(short = 'd')]
	corpus: PathBuf,

	/// Analysis mode: 1 = unigrams, 2 = bigrams
	#[arg(short = 'm')]
	mode: u8,

	/// Keep punctuation attached to words (stripped by default)
	#[arg(short = 'P')]
	keep_punctuation: bool,

	/// Author to work on (required by -F and -G)
	#[arg(short = 'a')]
	author: Option<String>,

	/// Print the rank-th most frequent gram of the selected author
	#[arg(short = 'F')]
	rank: Option<usize>,

	/// Unknown text file to attribute to an author
	#[arg(short = 'f')]
	unknown: Option<PathBuf>,

	/// Number of words to generate for the selected author
	#[arg(short = 'G')]
	generate: Option<usize>,

	/// Output file for the generated text (stdout when omitted)
	#[arg(short = 'g')]
	output: Option<PathBuf>,

	/// RNG seed for reproducible generation
	#[arg(long)]
	seed: Option<u64>,

	/// Keep only the top K grams when normalizing; -1 keeps all
	#[arg(long = "top-k", default_value_t = 300)]
	top_k: i64,

	/// Binary profile cache: loaded when present, written after a build
	#[arg(long)]
	cache: Option<PathBuf>,

	/// Verbose mode
	#[arg(short = 'v')]
	verbose: bool,
}

impl Args {
	fn top_k(&self) -> TopK {
		if self.top_k < 0 { TopK::All } else { TopK::Limit(self.top_k as usize) }
	}

	fn policy(&self) -> TokenPolicy {
		if self.keep_punctuation { TokenPolicy::keep_punctuation() } else { TokenPolicy::default() }
	}
}

/// Reads every author subdirectory into `(author, documents)` pairs,
/// where each document is the list of lines of one `.txt` work.
fn read_corpus(root: &Path) -> std::io::Result<Vec<(String, Vec<Vec<String>>)>> {
	let mut corpus = Vec::new();
	for author in list_dirs(root)? {
		let author_dir = root.join(&author);
		let mut documents = Vec::new();
		// Only .txt works are part of the corpus
		for book in list_files(&author_dir, "txt")? {
			documents.push(read_lines(author_dir.join(book))?);
		}
		corpus.push((author, documents));
	}
	Ok(corpus)
}

/// Builds (or loads from cache) the per-author profiles.
fn build_profiles(args: &Args, order: NgramOrder) -> Result<Vec<AuthorProfile>, Box<dyn Error>> {
	if let Some(cache) = &args.cache {
		if cache.exists() {
			info!("loading profiles from cache {}", cache.display());
			return Ok(load_profiles(cache)?);
		}
	}

	let corpus = read_corpus(&args.corpus)?;
	let policy = args.policy();
	let (profiles, failures) = scan_corpus(corpus, &policy, order);
	for (author, error) in &failures {
		warn!("author '{}' skipped: {}", author, error);
	}

	if let Some(cache) = &args.cache {
		save_profiles(cache, &profiles)?;
		info!("profiles cached to {}", cache.display());
	}
	Ok(profiles)
}

fn find_profile<'a>(
	profiles: &'a [AuthorProfile],
	author: &str,
) -> Result<&'a AuthorProfile, String> {
	profiles
		.iter()
		.find(|profile| profile.author() == author)
		.ok_or_else(|| format!("author '{author}' not found in the corpus"))
}

/// Prints the rank query: `author: gram probability`, probability on
/// the [0, 1] scale as the assignment asks.
fn run_rank_query(profile: &AuthorProfile, rank: usize, top_k: TopK) -> Result<(), Box<dyn Error>> {
	let distribution = profile.to_percent(top_k)?;
	match distribution.nth(rank) {
		Some((gram, percent)) => {
			println!("{}: {} {:.6}", profile.author(), gram, percent / 100.0);
			Ok(())
		}
		None => Err(format!("rank {rank} is out of range (1..={})", distribution.len()).into()),
	}
}

fn run_classification(
	args: &Args,
	path: &Path,
	profiles: &[AuthorProfile],
	order: NgramOrder,
) -> Result<(), Box<dyn Error>> {
	let policy = args.policy();

	let mut table = FrequencyTable::new(order);
	for line in read_lines(path)? {
		table.add_tokens(tokenize(&line, &policy));
	}
	let unknown = PercentDistribution::from_table(&table, args.top_k())?;

	let mut candidates = Vec::new();
	for profile in profiles {
		candidates.push((profile.author().to_owned(), profile.to_percent(args.top_k())?));
	}

	let ranked = classifier::rank(&unknown, &candidates, DistanceFormula::default())?;
	for attribution in &ranked {
		println!("  {}: {:.6}", attribution.author, attribution.score);
	}
	println!("{}: {} ({:.6})", path.display(), ranked[0].author, ranked[0].score);
	Ok(())
}

fn run_generation(args: &Args, profile: &AuthorProfile, length: usize) -> Result<(), Box<dyn Error>> {
	let generator = TextGenerator::from_table(profile.table())?;
	let input = match args.seed {
		Some(seed) => GenerationInput::with_seed(length, seed),
		None => GenerationInput::new(length),
	};

	let text = generator.generate(input.length, &mut input.rng());
	match &args.output {
		Some(path) => {
			write_generated(path, &text)?;
			info!("generated text written to {}", path.display());
		}
		None => println!("{text}"),
	}
	Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();

	let mut builder = env_logger::Builder::from_default_env();
	if args.verbose {
		builder.filter_level(log::LevelFilter::Debug);
	}
	builder.init();

	if args.verbose {
		info!("corpus directory: {}", args.corpus.display());
		info!("analysis mode: {}-grams", args.mode);
		info!("punctuation: {}", if args.keep_punctuation { "kept" } else { "stripped" });
		if let Some(author) = &args.author {
			info!("selected author: {author}");
		}
		if let Some(unknown) = &args.unknown {
			info!("unknown text: {}", unknown.display());
		}
	}

	let order = NgramOrder::from_mode(args.mode)?;
	let profiles = build_profiles(&args, order)?;
	info!("{} author profiles ready", profiles.len());

	if let (Some(author), Some(rank)) = (&args.author, args.rank) {
		run_rank_query(find_profile(&profiles, author)?, rank, args.top_k())?;
	}

	if let Some(path) = &args.unknown {
		run_classification(&args, path, &profiles, order)?;
	}

	if let (Some(author), Some(length)) = (&args.author, args.generate) {
		run_generation(&args, find_profile(&profiles, author)?, length)?;
	}

	Ok(())
}
