use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arbitrary::Unstructured;
use clap::Parser;
use rand::RngCore;
use sparse_set::debug_utils::{self, ArbitraryScriptConfig, OpScript};

#[derive(Parser)]
/// Tool for testing sparse-set.
enum Args {
    /// Replay an operation script against a reference model, checking the
    /// set after every operation.
    Run {
        /// Print the script before replaying it.
        #[clap(short = 'v')]
        verbose: bool,

        /// File containing the operation script.
        script: PathBuf,
    },

    /// Generate a random operation script.
    GenScript {
        /// Maximum number of operations in the script.
        #[clap(long, default_value_t = 100)]
        ops: usize,

        /// Maximum number of identifiers the set is grown to support.
        #[clap(long, default_value_t = 32)]
        max_supported: usize,

        /// Maximum value stored in the set.
        #[clap(long, default_value_t = 1000)]
        max_value: u32,
    },

    /// Parses the given script and re-dumps it with proper formatting.
    ///
    /// Note that this will strip all comments.
    FmtScript {
        /// File containing the operation script.
        script: PathBuf,
    },
}

fn load_script(path: &Path) -> Result<OpScript> {
    let script = fs::read(path).context("could not read script input file")?;
    let script = String::from_utf8(script).context("script input is not UTF-8")?;
    let script = OpScript::parse(&script).context("could not parse script input file")?;
    debug_utils::validate_script(&script).context("script validation failed")?;
    Ok(script)
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    match args {
        Args::Run {
            verbose,
            ref script,
        } => {
            let script = load_script(script)?;

            if verbose {
                println!("================ Script ================\n{script}");
            }

            let stats =
                debug_utils::check_script(&script).context("script replay failed checker")?;

            println!("================ Stats ================\n{stats}");
        }
        Args::GenScript {
            ops,
            max_supported,
            max_value,
        } => {
            let config = ArbitraryScriptConfig {
                num_ops: 0..=ops,
                max_supported: 1..=max_supported.max(1),
                values: 0..=max_value,
            };
            let mut bytes = vec![0; 16 * ops + 64];
            rand::rng().fill_bytes(&mut bytes);
            let script = OpScript::arbitrary_with_config(&mut Unstructured::new(&bytes), config)
                .context("failed to generate arbitrary script")?;
            log::debug!("Generated {} operations", script.len());

            // Sanity-check
            debug_utils::validate_script(&script).context("generated script validation failed")?;

            print!("{script}");
        }
        Args::FmtScript { ref script } => {
            let script = load_script(script)?;

            print!("{script}");
        }
    }
    Ok(())
}
