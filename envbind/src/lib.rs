//! Bind environment variables into nested structs
//!
//! `envbind` walks the fields of a struct, derives an environment variable
//! name for each one, and coerces the variable's text into the field's type.
//! Nested structs are descended into with an extended name, so `db.host`
//! is read from `DB_HOST`.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(EnvConf)]`, no per-field parsing code
//! - **Nested records**: plain fields, `Option<T>` (allocated only when
//!   something beneath it is set) and flattened fields
//! - **Configurable names**: prefix, separator and naming strategy on [`Loader`]
//! - **Extensible**: implement [`TextDecode`] for your own types
//! - **File-based configuration**: [`configtype::JsonFile`], [`configtype::YamlFile`],
//!   [`configtype::TomlFile`] and [`configtype::Base64`]
//!
//! # Value Parsing
//!
//! - Strings: used verbatim
//! - Booleans: `1`, `t`, `true`, `0`, `f`, `false` (any case)
//! - Integers and floats: decimal, range-checked by the field's width
//! - `Duration`: `300ms`, `5s`, `1h30m`
//! - `Vec<T>`: elements split on `,` (see [`Loader::with_array_separator`])
//! - `HashMap`/`BTreeMap`: JSON object, e.g. `{"key":"value"}`
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use envbind::EnvConf;
//!
//! #[derive(Debug, Default, EnvConf)]
//! struct Config {
//!     #[env(name = "HOST")]
//!     host: String,
//!     port: u16,
//!     timeout: Duration,
//!     numbers: Vec<i32>,
//! }
//!
//! # fn main() -> Result<(), envbind::EnvError> {
//! std::env::set_var("HOST", "localhost");
//! std::env::set_var("PORT", "8080");
//! std::env::set_var("TIMEOUT", "5s");
//! std::env::set_var("NUMBERS", "1,2,3,4");
//!
//! let mut config = Config::default();
//! envbind::load(&mut config)?;
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.timeout, Duration::from_secs(5));
//! assert_eq!(config.numbers, vec![1, 2, 3, 4]);
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "NAME")]`
//!
//! Read the field from exactly `NAME`. The loader's prefix and separator and
//! the names of enclosing fields are ignored.
//!
//! ## `#[env(alias = "NAME")]`
//!
//! Use `NAME` as this field's name segment instead of deriving it from the
//! identifier. The prefix and enclosing names still apply.
//!
//! ```rust
//! # use envbind::EnvConf;
//! #[derive(Default, EnvConf)]
//! struct Server {
//!     // Read from APP_LISTEN with prefix APP
//!     #[env(alias = "LISTEN")]
//!     address: String,
//! }
//! ```
//!
//! ## `#[env(flatten)]`
//!
//! Bind the fields of a nested record as if they were declared on the
//! enclosing one.
//!
//! ## `#[env(skip)]`
//!
//! Never bind this field.

#[doc(hidden)]
pub mod de;

mod bind;
pub mod configtype;
mod error;
mod field;
mod loader;
pub mod naming;

pub use envbind_derive::EnvConf;
pub use error::{DecodeSource, EnvError};
pub use field::{EnvConf, EnvField, FieldSpec, TextDecode};
pub use loader::{Loader, NamingStrategy, DEFAULT_ARRAY_SEPARATOR, DEFAULT_SEPARATOR};

/// Bind the current environment into `target` with the default [`Loader`].
///
/// The target must be a record; plain values do not compile:
///
/// ```rust,compile_fail,E0277
/// let mut port = 8080u16;
/// envbind::load(&mut port).unwrap();
/// ```
///
/// # Errors
///
/// See [`Loader::load`].
pub fn load<T: EnvConf>(target: &mut T) -> Result<(), EnvError> {
    Loader::new().load(target)
}

/// Bind the current environment into `target` with a configured [`Loader`].
///
/// ```rust
/// # use envbind::EnvConf;
/// #[derive(Default, EnvConf)]
/// struct Config {
///     numbers: Vec<u8>,
/// }
///
/// # fn main() -> Result<(), envbind::EnvError> {
/// std::env::set_var("APP_NUMBERS", "1;2;3");
///
/// let mut config = Config::default();
/// envbind::load_with(&mut config, |loader| {
///     loader.with_prefix("APP").with_array_separator(";")
/// })?;
/// assert_eq!(config.numbers, vec![1, 2, 3]);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// See [`Loader::load`].
pub fn load_with<T, F>(target: &mut T, configure: F) -> Result<(), EnvError>
where
    T: EnvConf,
    F: FnOnce(Loader) -> Loader,
{
    configure(Loader::new()).load(target)
}
