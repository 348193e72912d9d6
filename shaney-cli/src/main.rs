mod config;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use shaney_core::model::codec;
use shaney_core::{BuildOptions, Chain, Generator};

use config::ShaneyConfig;

#[derive(Debug, Parser)]
#[command(
	name = "shaney",
	about = "Build word-level Markov chain models and generate text from them"
)]
struct Args {
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Build a model file from one or more text files.
	#[command(alias = "read")]
	Build {
		/// Number of words in each prefix.
		prefix_len: NonZeroUsize,

		/// Path of the model file to write.
		model: PathBuf,

		/// Input text files, read in order as one stream.
		#[arg(required = true)]
		inputs: Vec<PathBuf>,

		/// Stop at the first unreadable input instead of skipping it.
		#[arg(long, default_value_t = false)]
		abort_on_error: bool,

		/// Start every input from an empty prefix.
		#[arg(long, default_value_t = false)]
		reset_window: bool,

		/// Config file. Defaults to $SHANEY_CONFIG, then <config dir>/shaney/config.toml.
		#[arg(long)]
		config: Option<PathBuf>,
	},

	/// Print generated text from a model file.
	Generate {
		/// Model file written by `build`.
		model: PathBuf,

		/// Maximum number of words to generate.
		count: NonZeroUsize,
	},
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

	match Args::parse().command {
		Command::Build { prefix_len, model, inputs, abort_on_error, reset_window, config } => {
			let mut options = ShaneyConfig::load(config.as_deref())?.build;
			if abort_on_error {
				options = options.aborting();
			}
			if reset_window {
				options = options.resetting_window();
			}
			build(prefix_len, &model, &inputs, &options)
		}
		Command::Generate { model, count } => {
			let text = generate(&model, count)?;
			println!("{}", text);
			Ok(())
		}
	}
}

fn build(
	prefix_len: NonZeroUsize,
	model: &Path,
	inputs: &[PathBuf],
	options: &BuildOptions,
) -> Result<()> {
	let mut chain = Chain::new(prefix_len.get())?;
	let report = chain.build_sources(inputs, options).context("failed to build the chain")?;
	if report.sources_read == 0 {
		bail!("none of the {} input files could be read", inputs.len());
	}
	info!(
		"read {} tokens from {} files ({} skipped), {} prefixes",
		report.tokens,
		report.sources_read,
		report.skipped.len(),
		chain.len()
	);

	codec::save(&chain, model).with_context(|| format!("failed to write model {}", model.display()))
}

fn generate(model: &Path, count: NonZeroUsize) -> Result<String> {
	let chain = codec::load(model)
		.with_context(|| format!("failed to load model {}", model.display()))?;
	Ok(Generator::new(&chain).generate_text(count.get()))
}
