mod loader;
mod types;

pub use loader::{ConfigError, BASE_URL_ENV, MAX_PAGE_SIZE};
pub use types::{ApiConfig, Config, Defaults, UiConfig};
