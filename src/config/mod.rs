#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

/// The public feed the original challenge was built against.
pub const DEFAULT_API_ENDPOINT: &str = "https://agl-developer-test.azurewebsites.net/people.json";
