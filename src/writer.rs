//! The accumulate-until-threshold write loop.
//!
//! Records are written until the running byte count reaches the target.
//! The check happens before each write, so a zero target produces an empty
//! file and any positive target overshoots by at most one record.
use anyhow::{Context, Result};
use rand::Rng;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::{GIB, GeneratorConfig, MIB};
use crate::format::{self, Dialect};
use crate::record::EventRecord;

/// Buffer size for the output file.
const WRITE_BUFFER_SIZE: usize = 1 << 20;

/// Emit a progress event each time another this-many bytes are written.
const PROGRESS_INTERVAL: u64 = 10 * MIB;

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub records: u64,
    /// Encoded bytes written, newlines included.
    pub bytes: u64,
}

impl Summary {
    pub fn gib(&self) -> f64 {
        self.bytes as f64 / GIB as f64
    }
}

/// Write records to `out` until at least `target_bytes` have been written.
pub fn write_records<W, R>(
    out: &mut W,
    target_bytes: u64,
    dialect: Dialect,
    rng: &mut R,
) -> Result<Summary>
where
    W: Write + ?Sized,
    R: Rng + ?Sized,
{
    let mut summary = Summary::default();
    let mut line = Vec::with_capacity(4096);
    let mut next_progress = PROGRESS_INTERVAL;

    while summary.bytes < target_bytes {
        let record = EventRecord::now(rng);
        format::encode_line(&record, dialect, &mut line).context("failed to encode record")?;
        out.write_all(&line).context("failed to write record")?;
        summary.bytes += line.len() as u64;
        summary.records += 1;

        if summary.bytes >= next_progress {
            tracing::debug!(
                records = summary.records,
                bytes = summary.bytes,
                target_bytes,
                "progress"
            );
            next_progress = next_progress_mark(summary.bytes);
        }
    }

    Ok(summary)
}

/// Create (or truncate) `config.output` and fill it to `config.target_bytes`,
/// drawing from the RNG `config.seed` selects.
pub fn generate(config: &GeneratorConfig) -> Result<Summary> {
    let path = config.output.as_path();
    let mut rng = config.rng();
    ensure_parent_dir(path)?;

    let file =
        File::create(path).with_context(|| format!("failed to create file: {}", path.display()))?;
    let mut out = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

    tracing::info!(
        path = %path.display(),
        target_bytes = config.target_bytes,
        dialect = %config.dialect,
        seed = ?config.seed,
        "generating log file"
    );

    let summary = write_records(&mut out, config.target_bytes, config.dialect, &mut rng)
        .with_context(|| format!("failed to write log file: {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to flush log file: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        records = summary.records,
        bytes = summary.bytes,
        "log file complete"
    );
    Ok(summary)
}

/// First progress threshold strictly above `written`.
fn next_progress_mark(written: u64) -> u64 {
    (written / PROGRESS_INTERVAL + 1) * PROGRESS_INTERVAL
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display())),
        _ => Ok(()),
    }
}

/// The one-line completion message printed to stdout.
pub fn completion_message(path: &Path, summary: &Summary) -> String {
    format!(
        "Generated log file at {} with size {:.2} GB",
        path.display(),
        summary.gib()
    )
}
