pub mod env;
pub mod source;
pub mod tracing_init;

pub use env::{AppConfig, SyncSettings};
pub use source::SourceConfig;
pub use tracing_init::init_tracing;
