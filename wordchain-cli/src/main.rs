use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{LevelFilter, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use wordchain_core::io::{build_output_path, ensure_writable, read_text, write_sentences};
use wordchain_core::text::{split_sentences, split_words, to_prose};
use wordchain_core::{ChainError, ChainModel, FallbackPolicy, GenerationInput, Generator, StartSeed};

const DEFAULT_OUTPUT_SUFFIX: &str = "out.txt";

#[derive(Parser, Debug)]
#[command(name = "wordchain", version, about = "Generate text from a word-level Markov chain")]
struct Cli {
	/// Corpus to train on
	input: PathBuf,

	/// Output file (default: <input stem>.out.txt beside the input)
	#[arg(short, long, value_name = "PATH")]
	output: Option<PathBuf>,

	/// Print sentences to stdout instead of writing a file
	#[arg(long, conflicts_with_all = ["output", "force"])]
	stdout: bool,

	/// Overwrite the output file if it already exists
	#[arg(long)]
	force: bool,

	/// Number of preceding words used as context
	#[arg(short = 'n', long, default_value_t = 2)]
	order: usize,

	/// Number of words to generate
	#[arg(short, long, default_value_t = 1000)]
	words: usize,

	/// Read at most this many characters of the input (0 = whole file)
	#[arg(long, value_name = "CHARS", default_value_t = 200_000)]
	max_chars: usize,

	/// Behavior when the trailing words were never seen as a context (reseed or fail)
	#[arg(long, default_value_t = FallbackPolicy::Reseed)]
	fallback: FallbackPolicy,

	/// Start from these words instead of a random context (must be `order` words)
	#[arg(long, value_name = "WORDS")]
	start: Option<String>,

	/// Seed the random generator for reproducible output
	#[arg(long)]
	seed: Option<u64>,

	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q, -qq)
	#[arg(short = 'q', long, action = ArgAction::Count)]
	quiet: u8,
}

/// Failures of a run, each mapped to a distinct process exit code.
#[derive(Error, Debug)]
enum AppError {
	#[error("Could not read input {}: {source}", path.display())]
	ReadInput { path: PathBuf, source: std::io::Error },

	#[error("{0}, refusing to overwrite (use --force)")]
	OutputExists(ChainError),

	#[error("Could not write output {}: {source}", path.display())]
	WriteOutput { path: PathBuf, source: std::io::Error },

	#[error(transparent)]
	Chain(#[from] ChainError),
}

impl AppError {
	fn exit_code(&self) -> u8 {
		match self {
			Self::ReadInput { .. } => 1,
			Self::OutputExists(_) => 2,
			Self::WriteOutput { .. } => 3,
			Self::Chain(_) => 4,
		}
	}
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{e}");
			ExitCode::from(e.exit_code())
		}
	}
}

fn init_logging(verbose: u8, quiet: u8) {
	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
	builder.format_timestamp_millis();
	if let Some(level) = level_override(verbose, quiet) {
		builder.filter_level(level);
	}
	let _ = builder.try_init();
}

/// Level forced by `-v`/`-q`; `None` leaves `RUST_LOG` (or `info`) in charge.
fn level_override(verbose: u8, quiet: u8) -> Option<LevelFilter> {
	match (verbose, quiet) {
		(0, 0) => None,
		(_, 1) => Some(LevelFilter::Warn),
		(_, q) if q > 1 => Some(LevelFilter::Error),
		(1, _) => Some(LevelFilter::Debug),
		_ => Some(LevelFilter::Trace),
	}
}

fn run(cli: Cli) -> Result<(), AppError> {
	// Check the destination before training so no work is wasted
	let output = if cli.stdout {
		None
	} else {
		let path = match &cli.output {
			Some(path) => path.clone(),
			None => build_output_path(&cli.input, DEFAULT_OUTPUT_SUFFIX)
				.map_err(|source| AppError::ReadInput { path: cli.input.clone(), source })?,
		};
		ensure_writable(&path, cli.force).map_err(|e| match e {
			ChainError::OutputExists(_) => AppError::OutputExists(e),
			other => AppError::Chain(other),
		})?;
		Some(path)
	};

	let text = read_text(&cli.input, cli.max_chars)
		.map_err(|source| AppError::ReadInput { path: cli.input.clone(), source })?;
	let tokens = split_words(&text);
	info!("Read {} words from {}", tokens.len(), cli.input.display());

	let model = ChainModel::train(&tokens, cli.order)?;
	info!("Trained order-{} chain with {} contexts", model.order(), model.len());

	let input = GenerationInput {
		fallback: cli.fallback,
		start_seed: match &cli.start {
			Some(start) => StartSeed::Custom(split_words(start)),
			None => StartSeed::Random,
		},
	};
	let generator = Generator::new(&model, input)?;
	let words = match cli.seed {
		Some(seed) => generator.generate(cli.words, &mut StdRng::seed_from_u64(seed))?,
		None => generator.generate(cli.words, &mut rand::rng())?,
	};

	let sentences = split_sentences(&to_prose(&words));
	info!("Generated {} words, {} sentences", words.len(), sentences.len());

	match output {
		Some(path) => {
			write_sentences(&path, &sentences)
				.map_err(|source| AppError::WriteOutput { path: path.clone(), source })?;
			info!("Wrote {}", path.display());
		}
		None => {
			for sentence in &sentences {
				println!("{sentence}");
			}
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn no_flag_keeps_env_filter() {
		assert_eq!(level_override(0, 0), None);
	}

	#[test]
	fn flags_force_a_level() {
		assert_eq!(level_override(1, 0), Some(LevelFilter::Debug));
		assert_eq!(level_override(3, 0), Some(LevelFilter::Trace));
		assert_eq!(level_override(0, 1), Some(LevelFilter::Warn));
		assert_eq!(level_override(2, 2), Some(LevelFilter::Error));
	}
}
