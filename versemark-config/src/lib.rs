//! Shared configuration loader for versemark.
//!
//! `defaults/versemark.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. Applications layer a
//! user file and command-line overrides on top via [`Loader`] before
//! deserializing into [`VersemarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/versemark.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct VersemarkConfig {
    pub paths: PathsConfig,
    pub tokenizer: TokenizerConfig,
    pub output: OutputConfig,
}

/// Input and output locations. Relative paths are resolved by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub corpus: PathBuf,
    pub highlights: PathBuf,
    /// Unset means the highlights file is rewritten in place.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl PathsConfig {
    /// Join every relative path onto `base`.
    pub fn resolved_against(&self, base: &Path) -> PathsConfig {
        PathsConfig {
            corpus: base.join(&self.corpus),
            highlights: base.join(&self.highlights),
            output: self.output.as_ref().map(|p| base.join(p)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerConfig {
    /// Each character of each entry separates words, alongside whitespace.
    pub extra_delimiters: Vec<String>,
}

impl TokenizerConfig {
    pub fn delimiter_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.extra_delimiters.iter().flat_map(|s| s.chars())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Spaces per indentation level in the written JSON.
    pub indent: usize,
}

/// Builds a [`VersemarkConfig`] from the embedded defaults plus whatever the
/// caller layers on top. Later layers win key by key, so a project file that
/// only sets `paths.corpus` still inherits the default highlights path.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Seeded with `defaults/versemark.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a file the user named explicitly (`--config`). Building fails if
    /// it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a `versemark.toml` that may or may not sit in the project
    /// directory. An absent file leaves the defaults in place.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key such as `output.indent`, above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers. Paths come back exactly as written; see
    /// [`PathsConfig::resolved_against`] for anchoring them.
    pub fn build(self) -> Result<VersemarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in settings alone: `../public` paths, maqaf splitting, indent 4.
pub fn load_defaults() -> Result<VersemarkConfig, ConfigError> {
    Loader::new().build()
}
