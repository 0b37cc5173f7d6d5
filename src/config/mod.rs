//! Configuration — settings structs with TOML persistence and the
//! platform-appropriate filesystem locations they live in.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, CaptureConfig, SttConfig};
