use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use telegen::config::{self, GeneratorConfig, MIB};
use telegen::format::Dialect;

#[derive(Parser)]
#[command(
    name = "telegen",
    about = "Generate a large NDJSON telemetry log for testing",
    version
)]
struct Cli {
    /// Output file; parent directories are created, an existing file is truncated
    #[arg(short = 'o', long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Target size in MiB
    #[arg(long, default_value_t = config::DEFAULT_TARGET_MIB, conflicts_with = "target_bytes")]
    target_mib: u64,

    /// Target size in bytes (overrides --target-mib)
    #[arg(long)]
    target_bytes: Option<u64>,

    /// Seed the RNG for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output dialect: `standard`, or `legacy` for the old key spellings and separators
    #[arg(long, default_value_t = Dialect::Standard)]
    dialect: Dialect,

    /// Don't print the completion line
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Result<GeneratorConfig> {
        let target_bytes = match self.target_bytes {
            Some(bytes) => bytes,
            None => self
                .target_mib
                .checked_mul(MIB)
                .with_context(|| format!("target size too large: {} MiB", self.target_mib))?,
        };
        Ok(GeneratorConfig {
            output: self.output,
            target_bytes,
            dialect: self.dialect,
            seed: self.seed,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let quiet = cli.quiet;
    let config = cli.into_config()?;

    let summary = telegen::generate(&config)?;

    if !quiet {
        println!("{}", telegen::writer::completion_message(&config.output, &summary));
    }

    Ok(())
}
