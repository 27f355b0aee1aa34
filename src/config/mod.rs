//! Configuration loading and resolution.
mod apply;
mod data;
mod discover;
mod loader;
pub mod types;


pub use apply::{ResolvedConfig, resolve_config};
pub use data::load_data_rows;
pub use discover::{discover_config_files, is_config_file};
pub use loader::{load_config, load_config_file};
pub use types::{DataSource, RunConfig};
