//! Capability traits implemented by bindable types

use crate::error::EnvError;
use crate::loader::Loader;

/// Static metadata of one record field, emitted by `#[derive(EnvConf)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Declared identifier (without a `r#` prefix).
    pub ident: &'static str,
    /// Exact environment variable name from `#[env(name = "...")]`.
    ///
    /// Used verbatim: prefix, separator and parent segments do not apply.
    pub name: Option<&'static str>,
    /// Alias from `#[env(alias = "...")]`, replacing the strategy-derived segment.
    pub alias: Option<&'static str>,
    /// `#[env(flatten)]`: the field contributes no name segment of its own.
    pub flatten: bool,
}

impl FieldSpec {
    /// Descriptor for a field with no naming attributes.
    pub const fn new(ident: &'static str) -> Self {
        Self {
            ident,
            name: None,
            alias: None,
            flatten: false,
        }
    }
}

/// A record whose fields can be bound from environment variables.
///
/// Implemented by `#[derive(EnvConf)]`. The generated [`bind_fields`](EnvConf::bind_fields)
/// calls [`Loader::bind_field`] for every non-skipped field in declaration order.
pub trait EnvConf {
    /// Bind every field of this record.
    ///
    /// Returns whether any field (including nested ones) was found in the
    /// environment. Prefer [`Loader::bind_record`], which adds the fault guard.
    fn bind_fields(&mut self, loader: &Loader, segments: &[String]) -> Result<bool, EnvError>;

    /// Build a record from its default value and the current environment.
    ///
    /// # Errors
    ///
    /// - Environment variable values cannot be coerced into field types
    /// - A custom decoder or file-based field fails
    fn from_env() -> anyhow::Result<Self>
    where
        Self: Default + Sized,
    {
        let mut conf = Self::default();
        Loader::new().load(&mut conf)?;
        Ok(conf)
    }
}

/// A type that can be the target of one record field.
///
/// Implemented for strings, booleans, numbers, `Duration`, `Vec<T>`,
/// `HashMap`/`BTreeMap`, `Option<T>`, every [`TextDecode`] type and every
/// `#[derive(EnvConf)]` record. Any other field type is rejected when the
/// record is compiled:
///
/// ```rust,compile_fail,E0277
/// use envbind::EnvConf;
///
/// #[derive(EnvConf)]
/// struct Server {
///     socket: std::net::TcpStream,
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "unsupported field type `{Self}`",
    label = "cannot be bound from an environment variable",
    note = "implement `envbind::TextDecode` for custom types, or derive `EnvConf` for records"
)]
pub trait EnvField {
    /// Coerce `text` into this value.
    ///
    /// Returns `Ok(false)` when the type is record-shaped and the text is not
    /// used; the engine then descends into it instead.
    fn assign(&mut self, text: &str, loader: &Loader) -> Result<bool, EnvError>;

    /// Bind nested fields under the naming context `segments`.
    ///
    /// Leaf types have nothing to descend into.
    fn descend(&mut self, loader: &Loader, segments: &[String]) -> Result<bool, EnvError> {
        let _ = (loader, segments);
        Ok(false)
    }
}

/// Decode a value from its textual representation.
///
/// This is the extension point for custom field types. When a field's
/// variable is present, the text is handed to [`decode_text`](TextDecode::decode_text)
/// and built-in coercion is not attempted.
///
/// ```rust
/// use envbind::TextDecode;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Level(u8);
///
/// impl TextDecode for Level {
///     fn decode_text(&mut self, text: &str) -> anyhow::Result<()> {
///         self.0 = match text {
///             "low" => 1,
///             "high" => 9,
///             other => anyhow::bail!("unknown level: {other}"),
///         };
///         Ok(())
///     }
/// }
///
/// let mut level = Level::default();
/// level.decode_text("high").unwrap();
/// assert_eq!(level, Level(9));
/// ```
pub trait TextDecode {
    /// Replace `self` with the value decoded from `text`.
    fn decode_text(&mut self, text: &str) -> anyhow::Result<()>;
}

impl<T: TextDecode> EnvField for T {
    fn assign(&mut self, text: &str, _loader: &Loader) -> Result<bool, EnvError> {
        self.decode_text(text)
            .map_err(|e| EnvError::decode_error::<T>(e))?;
        Ok(true)
    }
}
