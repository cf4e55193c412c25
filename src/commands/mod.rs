pub mod allowlist;
pub mod classify;
pub mod config;
pub mod context;
pub mod run;

pub use allowlist::run_allowlist;
pub use classify::run_classify;
pub use config::{format_config_text, run_config};
pub use run::run_run;
