//! `FoxLba` CLI - convert locator files and dump their hashes

pub mod progress;

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use crate::batch::{self, BatchOptions, BatchProgress, FailurePolicy};
use crate::config::Config;
use crate::dictionary::{CollisionPolicy, HashDictionary};
use crate::hash::HashDomain;
use progress::{DOCUMENT, GEAR, LOOKING_GLASS};

#[derive(Parser, Debug)]
#[command(name = "foxlba")]
#[command(about = "Convert Fox Engine locator files (.lba) to and from XML", long_about = None)]
#[command(version)]
struct Cli {
    /// Files or directories to process (.lba → .lba.xml, .xml → .lba)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Write the unique hashes of each .lba instead of converting it
    #[arg(short, long)]
    output_hashes: bool,

    /// Name-hash word list (overrides the config file)
    #[arg(long, value_name = "FILE")]
    name_dictionary: Option<PathBuf>,

    /// Path-hash word list (overrides the config file)
    #[arg(long, value_name = "FILE")]
    path_dictionary: Option<PathBuf>,

    /// Config file [default: ./foxlba.toml if present]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Continue with the next input when one fails
    #[arg(long)]
    keep_going: bool,

    /// Resolve colliding dictionary entries to the lexicographically smallest literal
    #[arg(long)]
    deterministic: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Map the legacy `-outputHashes` switch (any case) onto `--output-hashes`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg.to_str().is_some_and(|a| a.eq_ignore_ascii_case("-outputhashes")) {
                OsString::from("--output-hashes")
            } else {
                arg
            }
        })
        .collect()
}

impl Cli {
    fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.name_dictionary {
            config.dictionaries.name = Some(path.clone());
        }
        if let Some(path) = &self.path_dictionary {
            config.dictionaries.path = Some(path.clone());
        }
        if self.deterministic {
            config.dictionaries.collision = CollisionPolicy::Lexicographic;
        }
        if self.keep_going {
            config.batch.failure = FailurePolicy::Isolate;
        }
    }
}

/// Run the `FoxLba` CLI
///
/// # Errors
/// Returns an error if the config is invalid, a dictionary cannot be read, or
/// an input fails. Under `--keep-going` the error only summarizes the
/// failures after every input has been tried.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let level = if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let start = Instant::now();

    let mut config = Config::discover(cli.config.as_deref()).context("Failed to load config")?;
    cli.apply_to(&mut config);

    if !cli.quiet {
        println!("{LOOKING_GLASS}Loading dictionaries...");
    }
    let dictionary = config
        .load_dictionary()
        .context("Failed to load hash dictionaries")?;
    log_dictionary(&dictionary);

    let inputs = batch::expand_inputs(&cli.paths)?;
    let options = BatchOptions {
        output_hashes: cli.output_hashes,
        failure: config.batch.failure,
    };

    let result = batch::process_batch(&inputs, &dictionary, &options, |p: &BatchProgress| {
        if !cli.quiet {
            let emoji = if options.output_hashes { &DOCUMENT } else { &GEAR };
            progress::print_step(p.current, p.total, emoji, &p.path.display().to_string());
        }
    })?;

    for (path, err) in &result.failures {
        progress::print_failure(&format!("{}: {err}", path.display()));
    }
    if !result.failures.is_empty() {
        anyhow::bail!(
            "{} of {} inputs failed",
            result.failures.len(),
            inputs.len()
        );
    }

    if !cli.quiet {
        progress::print_done(start.elapsed());
    }
    Ok(())
}

fn log_dictionary(dictionary: &HashDictionary) {
    for domain in [HashDomain::Name, HashDomain::Path] {
        tracing::info!("{} dictionary: {} entries", domain, dictionary.len(domain));
    }
}
