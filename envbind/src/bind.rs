//! Recursive binding of environment variables into records

use std::any::Any;
use std::env;
use std::panic::{self, AssertUnwindSafe};

use crate::error::EnvError;
use crate::field::{EnvConf, EnvField, FieldSpec};
use crate::loader::Loader;

impl Loader {
    /// Bind the fields of `record` under the naming context `segments`.
    ///
    /// Returns whether any field, nested ones included, was found. A panic
    /// raised while binding this level is reported as [`EnvError::Panic`]
    /// naming the record type and the naming context.
    pub fn bind_record<T: EnvConf + ?Sized>(
        &self,
        record: &mut T,
        segments: &[String],
    ) -> Result<bool, EnvError> {
        match panic::catch_unwind(AssertUnwindSafe(|| record.bind_fields(self, segments))) {
            Ok(result) => result,
            Err(payload) => {
                let err = EnvError::Panic {
                    type_name: std::any::type_name::<T>().to_string(),
                    prefix: self.context(segments),
                    message: panic_message(payload.as_ref()),
                };
                tracing::debug!(error = %err, "recovered from panic while binding record");
                Err(err)
            }
        }
    }

    /// Bind one field of a record.
    ///
    /// When the field's variable is present its text is assigned; errors are
    /// wrapped with the lookup key. When it is absent, or the field is a
    /// record that does not take text, the engine descends into the field
    /// with the extended naming context.
    pub fn bind_field<F: EnvField + ?Sized>(
        &self,
        field: &mut F,
        spec: &FieldSpec,
        segments: &[String],
    ) -> Result<bool, EnvError> {
        let (key, nested) = self.derive_key(spec, segments);

        if let Some(value) = self.lookup(&key)? {
            tracing::trace!(%key, field = spec.ident, "found environment variable");
            let set = field
                .assign(&value, self)
                .map_err(|source| EnvError::Field {
                    key: key.clone(),
                    source: Box::new(source),
                })?;
            if set {
                return Ok(true);
            }
        }

        field.descend(self, &nested)
    }

    /// Read `key` from the process environment.
    fn lookup(&self, key: &str) -> Result<Option<String>, EnvError> {
        if key.is_empty() {
            return Ok(None);
        }

        match env::var_os(key) {
            Some(value) => value
                .into_string()
                .map(Some)
                .map_err(|_| EnvError::NotUnicode {
                    key: key.to_string(),
                }),
            None => Ok(None),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
