//! Generator configuration.
//!
//! Defaults reproduce the historical hardcoded run: `/tmp/xxx.log`,
//! 100 MiB, standard dialect, OS-seeded RNG.
use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::format::Dialect;

pub const MIB: u64 = 1024 * 1024;
pub const GIB: u64 = 1024 * MIB;

pub const DEFAULT_OUTPUT: &str = "/tmp/xxx.log";
pub const DEFAULT_TARGET_MIB: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Output file. Parent directories are created; an existing file is truncated.
    pub output: PathBuf,
    /// Stop once at least this many bytes have been written.
    pub target_bytes: u64,
    pub dialect: Dialect,
    /// Fixed seed for reproducible output; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            target_bytes: DEFAULT_TARGET_MIB * MIB,
            dialect: Dialect::Standard,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Build the RNG this configuration asks for.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
