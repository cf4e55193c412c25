mod filesystem;
mod model;
mod store;

pub use filesystem::{APP_NAME, FileSystem, RealFileSystem};
pub use model::{AppConfig, ConfigKey};
pub use store::{CONFIG_FILE_NAME, ConfigStore};
