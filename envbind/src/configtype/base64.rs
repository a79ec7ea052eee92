use std::ops::Deref;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::field::TextDecode;

/// A value supplied base64-encoded, stored decoded.
///
/// ```rust
/// use envbind::configtype::Base64;
/// use envbind::TextDecode;
///
/// let mut secret = Base64::default();
/// secret.decode_text("dGVzdC1zZWNyZXQ=").unwrap();
/// assert_eq!(secret.as_str(), Some("test-secret"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Base64(Vec<u8>);

impl Base64 {
    /// Wrap already-decoded bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decoded bytes as text, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Consume the wrapper, returning the decoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Base64 {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl TextDecode for Base64 {
    /// Decodes standard, padded base64. Empty text leaves the value untouched.
    fn decode_text(&mut self, text: &str) -> anyhow::Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        self.0 = STANDARD
            .decode(text)
            .context("failed to decode base64 string")?;
        Ok(())
    }
}
