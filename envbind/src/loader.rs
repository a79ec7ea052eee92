//! Loader configuration and lookup key derivation

use std::fmt;
use std::sync::Arc;

use crate::error::EnvError;
use crate::field::{EnvConf, FieldSpec};
use crate::naming::upper_snake_case;

/// Default separator placed between the prefix and name segments.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Default separator between the elements of a sequence value.
pub const DEFAULT_ARRAY_SEPARATOR: &str = ",";

/// Function deriving the base name segment of a field from its identifier.
pub type NamingStrategy = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Binds environment variables into records.
///
/// A loader only holds immutable configuration; one instance can be reused
/// for any number of [`load`](Loader::load) calls, from any thread.
///
/// ```rust
/// use envbind::{EnvConf, Loader};
///
/// #[derive(Debug, Default, EnvConf)]
/// struct Database {
///     host: String,
///     port: u16,
/// }
///
/// #[derive(Debug, Default, EnvConf)]
/// struct Config {
///     db: Database,
/// }
///
/// # fn main() -> Result<(), envbind::EnvError> {
/// std::env::set_var("APP.DB.HOST", "db.example.com");
///
/// let loader = Loader::new().with_prefix("APP").with_separator(".");
/// let mut config = Config::default();
/// loader.load(&mut config)?;
/// assert_eq!(config.db.host, "db.example.com");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Loader {
    prefix: String,
    separator: String,
    array_separator: String,
    naming: NamingStrategy,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
            array_separator: DEFAULT_ARRAY_SEPARATOR.to_string(),
            naming: Arc::new(upper_snake_case),
        }
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("prefix", &self.prefix)
            .field("separator", &self.separator)
            .field("array_separator", &self.array_separator)
            .finish_non_exhaustive()
    }
}

impl Loader {
    /// Create a loader with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every derived key.
    ///
    /// With prefix `APP` the field `host` is read from `APP_HOST`. Fields with
    /// an exact `#[env(name = "...")]` are not affected.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Join the prefix and nested name segments with `separator`.
    ///
    /// With separator `.` the nested field `db.host` is read from `DB.HOST`.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Split sequence values on `separator`.
    ///
    /// With separator `;` a `Vec<i32>` field is read from `1;2;3;4`.
    pub fn with_array_separator(mut self, separator: impl Into<String>) -> Self {
        self.array_separator = separator.into();
        self
    }

    /// Derive base name segments with `transformer` instead of [`upper_snake_case`].
    pub fn with_key_transformer<F>(mut self, transformer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.naming = Arc::new(transformer);
        self
    }

    /// Prefix placed before every derived key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Separator between the prefix and name segments.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Separator between sequence elements.
    pub fn array_separator(&self) -> &str {
        &self.array_separator
    }

    /// Bind the current environment into `target`.
    ///
    /// # Errors
    ///
    /// Returns the first coercion, decode or fault error encountered in
    /// field declaration order. Fields set before the failure keep their
    /// new values.
    pub fn load<T: EnvConf>(&self, target: &mut T) -> Result<(), EnvError> {
        self.bind_record(target, &[])?;
        Ok(())
    }

    /// Compute the lookup key of `field` and the naming context for its children.
    ///
    /// 1. An exact name is returned verbatim and the context is unchanged.
    /// 2. A flattened field uses the parent context as its key and passes it on.
    /// 3. Otherwise the alias, or the naming strategy applied to the
    ///    identifier, is pushed onto the context and joined with the prefix.
    pub fn derive_key(&self, field: &FieldSpec, parent: &[String]) -> (String, Vec<String>) {
        if let Some(name) = field.name {
            return (name.to_string(), parent.to_vec());
        }

        if field.flatten {
            return (self.join_key(parent), parent.to_vec());
        }

        let base = match field.alias {
            Some(alias) => alias.to_string(),
            None => (self.naming)(field.ident),
        };

        let mut segments = Vec::with_capacity(parent.len() + 1);
        segments.extend_from_slice(parent);
        segments.push(base);

        (self.join_key(&segments), segments)
    }

    /// Join the prefix and `segments` with the separator, skipping empty parts.
    pub(crate) fn join_key(&self, segments: &[String]) -> String {
        std::iter::once(self.prefix.as_str())
            .chain(segments.iter().map(String::as_str))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(self.separator.as_str())
    }

    /// Naming context as shown in error messages.
    pub(crate) fn context(&self, segments: &[String]) -> String {
        segments.join(self.separator.as_str())
    }
}
