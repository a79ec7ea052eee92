//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates naming attributes from struct fields
//! during macro expansion.

use syn::{Field, LitStr};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Exact environment variable name, bypassing prefix and nesting.
    pub name: Option<String>,

    /// Replacement for the strategy-derived name segment.
    pub alias: Option<String>,

    /// Bind the nested record's fields under the parent's name.
    pub flatten: bool,

    /// Leave the field out of binding entirely.
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Attributes other than `env` are left for other macros. Unknown keys
    /// inside `env(...)` and contradictory combinations are errors.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    if attrs.name.is_some() {
                        return Err(meta.error("duplicate env attribute `name`"));
                    }
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.name = Some(value.value());
                    return Ok(());
                }

                // alias = "..."
                if meta.path.is_ident("alias") {
                    if attrs.alias.is_some() {
                        return Err(meta.error("duplicate env attribute `alias`"));
                    }
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.alias = Some(value.value());
                    return Ok(());
                }

                if meta.path.is_ident("flatten") {
                    attrs.flatten = true;
                    return Ok(());
                }

                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        if attrs.flatten && attrs.alias.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "flatten fields contribute no name segment, alias has no effect",
            ));
        }

        if attrs.flatten && attrs.name.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "flatten fields have no variable of their own, name has no effect",
            ));
        }

        if attrs.flatten && attrs.skip {
            return Err(syn::Error::new_spanned(
                field,
                "a field cannot be both flatten and skip",
            ));
        }

        Ok(attrs)
    }
}
