pub mod config;
pub mod format;
pub mod record;
pub mod writer;

pub use config::GeneratorConfig;
pub use format::Dialect;
pub use record::EventRecord;
pub use writer::{Summary, generate, write_records};
