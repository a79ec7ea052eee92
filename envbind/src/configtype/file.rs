use std::fmt;
use std::fs;
use std::marker::PhantomData;

use anyhow::Context;
use serde::de::DeserializeOwned;

use super::expand::expand_env;
use crate::field::TextDecode;

/// A configuration file format.
pub trait FileFormat {
    /// Human-readable name used in error messages.
    const NAME: &'static str;

    /// Parse file contents into `T`.
    fn parse<T: DeserializeOwned>(content: &str) -> anyhow::Result<T>;
}

/// JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json;

impl FileFormat for Json {
    const NAME: &'static str = "JSON";

    fn parse<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
        Ok(serde_json::from_str(content)?)
    }
}

/// YAML via `serde_yaml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Yaml;

impl FileFormat for Yaml {
    const NAME: &'static str = "YAML";

    fn parse<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// TOML via `toml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toml;

impl FileFormat for Toml {
    const NAME: &'static str = "TOML";

    fn parse<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
        Ok(toml::from_str(content)?)
    }
}

/// Configuration loaded from the file whose path is held by a variable.
///
/// The variable's text is stored as [`file_path`](ConfigFile::file_path);
/// references to other variables in the path and in the file contents are
/// expanded before parsing into [`data`](ConfigFile::data).
pub struct ConfigFile<T, F> {
    /// Path as supplied, before expansion.
    pub file_path: String,
    /// Parsed contents.
    pub data: T,
    format: PhantomData<fn() -> F>,
}

/// Configuration loaded from a JSON file.
pub type JsonFile<T> = ConfigFile<T, Json>;

/// Configuration loaded from a YAML file.
pub type YamlFile<T> = ConfigFile<T, Yaml>;

/// Configuration loaded from a TOML file.
pub type TomlFile<T> = ConfigFile<T, Toml>;

impl<T: Default, F> ConfigFile<T, F> {
    /// Wrapper pointing at `file_path`, not yet loaded.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            data: T::default(),
            format: PhantomData,
        }
    }
}

impl<T: DeserializeOwned, F: FileFormat> ConfigFile<T, F> {
    /// Read and parse the file again.
    ///
    /// Does nothing when no path has been set.
    pub fn reload(&mut self) -> anyhow::Result<()> {
        if self.file_path.is_empty() {
            return Ok(());
        }
        self.parse_file()
    }

    fn parse_file(&mut self) -> anyhow::Result<()> {
        let path = expand_env(&self.file_path);
        tracing::debug!(%path, format = F::NAME, "loading configuration file");

        let content = fs::read_to_string(&path)
            .with_context(|| format!("cannot read {} file: {path}", F::NAME))?;
        let content = expand_env(&content);

        self.data = F::parse(&content)
            .with_context(|| format!("failed to parse {} file: {path}", F::NAME))?;
        Ok(())
    }
}

impl<T: DeserializeOwned, F: FileFormat> TextDecode for ConfigFile<T, F> {
    fn decode_text(&mut self, text: &str) -> anyhow::Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        self.file_path = text.to_string();
        self.parse_file()
    }
}

impl<T: Default, F> Default for ConfigFile<T, F> {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<T: Clone, F> Clone for ConfigFile<T, F> {
    fn clone(&self) -> Self {
        Self {
            file_path: self.file_path.clone(),
            data: self.data.clone(),
            format: PhantomData,
        }
    }
}

impl<T: fmt::Debug, F: FileFormat> fmt::Debug for ConfigFile<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFile")
            .field("format", &F::NAME)
            .field("file_path", &self.file_path)
            .field("data", &self.data)
            .finish()
    }
}

impl<T: PartialEq, F> PartialEq for ConfigFile<T, F> {
    fn eq(&self, other: &Self) -> bool {
        self.file_path == other.file_path && self.data == other.data
    }
}
