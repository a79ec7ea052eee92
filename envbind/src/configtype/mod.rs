//! Ready-made field types decoded from environment variables
//!
//! - [`Base64`]: a base64-encoded value
//! - [`JsonFile`], [`YamlFile`], [`TomlFile`]: the variable holds a path to a
//!   configuration file whose parsed contents end up in `data`
//!
//! File paths and file contents may reference other environment variables
//! as `$VAR` or `${VAR}`; see [`expand_env`].
//!
//! ```rust,no_run
//! use envbind::configtype::{Base64, JsonFile};
//! use envbind::EnvConf;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct DbConfig {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, EnvConf)]
//! struct AppConfig {
//!     // DB_CONFIG=/etc/app/db.json
//!     #[env(name = "DB_CONFIG")]
//!     db: JsonFile<DbConfig>,
//!
//!     // API_SECRET=dGVzdC1zZWNyZXQ=
//!     #[env(name = "API_SECRET")]
//!     secret: Base64,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = AppConfig::from_env()?;
//! println!("{}:{}", config.db.data.host, config.db.data.port);
//! # Ok(())
//! # }
//! ```

mod base64;
mod expand;
mod file;

pub use self::base64::Base64;
pub use expand::{expand, expand_env};
pub use file::{ConfigFile, FileFormat, Json, JsonFile, Toml, TomlFile, Yaml, YamlFile};
