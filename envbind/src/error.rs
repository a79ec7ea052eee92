//! Error types for binding environment variables into records

/// Boxed error returned by [`TextDecode`](crate::TextDecode) implementations.
pub type DecodeSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while binding environment variables into a record.
///
/// The binding engine stops at the first error. Fields processed before the
/// failing one keep whatever was assigned to them.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// Text could not be converted into the target type.
    ///
    /// Covers malformed numbers, booleans, durations and JSON literals as
    /// well as integers that do not fit the field's width.
    #[error("cannot parse {value:?} as {type_name}: {message}")]
    Parse {
        /// Fully qualified type name that parsing was attempted for
        type_name: String,
        /// The offending text
        value: String,
        /// Error message from the parser
        message: String,
    },

    /// One element of a sequence value failed to coerce.
    #[error("cannot set slice value at index {index}: {source}")]
    SliceElement {
        /// Zero-based position of the element after splitting
        index: usize,
        /// Why the element failed
        source: Box<EnvError>,
    },

    /// A [`TextDecode`](crate::TextDecode) implementation rejected the text.
    #[error("cannot decode text into {type_name}: {source}")]
    Decode {
        /// Type whose decoder failed
        type_name: String,
        /// Error reported by the decoder
        source: DecodeSource,
    },

    /// The variable exists but its value is not valid unicode.
    #[error("environment variable '{key}' is not valid unicode")]
    NotUnicode {
        /// Lookup key of the variable
        key: String,
    },

    /// Setting a field from its environment variable failed.
    ///
    /// Wraps every per-field error with the lookup key that produced it.
    #[error("cannot set field {key} value: {source}")]
    Field {
        /// Lookup key of the field
        key: String,
        /// Underlying failure
        source: Box<EnvError>,
    },

    /// A panic occurred while binding the fields of a record.
    #[error("cannot load to struct {type_name} (prefix={prefix}). panic: {message}")]
    Panic {
        /// Record type being bound
        type_name: String,
        /// Naming context joined with the separator
        prefix: String,
        /// Panic payload, if it was a string
        message: String,
    },
}

impl EnvError {
    /// Create a parse error for target type `T`
    pub fn parse_error<T: ?Sized>(value: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            type_name: std::any::type_name::<T>().to_string(),
            value: value.into(),
            message: message.to_string(),
        }
    }

    /// Create a decode error for target type `T`
    pub fn decode_error<T: ?Sized>(source: impl Into<DecodeSource>) -> Self {
        Self::Decode {
            type_name: std::any::type_name::<T>().to_string(),
            source: source.into(),
        }
    }

    /// Lookup key of the field that failed, if the error was raised by a field.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Field { key, .. } | Self::NotUnicode { key } => Some(key.as_str()),
            _ => None,
        }
    }

    /// Innermost error, skipping `Field` and `SliceElement` wrappers.
    pub fn root_cause(&self) -> &EnvError {
        match self {
            Self::Field { source, .. } | Self::SliceElement { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
