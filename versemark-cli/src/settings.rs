//! Configuration and path resolution for the CLI.
//!
//! Relative paths from the configuration are joined onto a base directory,
//! chosen in this order:
//! 1. `--root`
//! 2. the directory of the `--config` file
//! 3. the directory holding the executable
//!
//! Without `--config`, an optional `versemark.toml` in the base directory is
//! layered over the built-in defaults.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use versemark_config::{Loader, VersemarkConfig};
use versemark_core::{SyncJob, Tokenizer};

/// Looked up next to the base directory when no `--config` is given.
const LOCAL_CONFIG_FILENAME: &str = "versemark.toml";

/// Command-line inputs that shape the configuration.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub corpus: Option<PathBuf>,
    pub highlights: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub indent: Option<usize>,
}

/// Picks the directory relative configuration paths are resolved against.
pub fn base_dir(root: Option<&Path>, config_file: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = root {
        return Ok(root.to_path_buf());
    }

    if let Some(file) = config_file {
        // A bare file name has an empty parent, which resolves against the cwd
        return Ok(file.parent().map(Path::to_path_buf).unwrap_or_default());
    }

    let exe = std::env::current_exe().context("Failed to locate the versemark executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Executable has no parent directory: {}", exe.display()))
}

/// Layers defaults, the user file and flag overrides.
pub fn load_config(overrides: &Overrides, base: &Path) -> Result<VersemarkConfig> {
    let mut loader = match &overrides.config_file {
        Some(file) => Loader::new().with_file(file),
        None => Loader::new().with_optional_file(base.join(LOCAL_CONFIG_FILENAME)),
    };

    if let Some(indent) = overrides.indent {
        let indent = i64::try_from(indent).context("Indent is too large")?;
        loader = loader.set_override("output.indent", indent)?;
    }

    loader.build().context("Failed to load configuration")
}

/// Builds the sync job. Path flags are taken relative to the current
/// directory, like any other command-line path.
pub fn build_job(config: &VersemarkConfig, overrides: &Overrides, base: &Path) -> SyncJob {
    let paths = config.paths.resolved_against(base);
    let corpus = overrides.corpus.clone().unwrap_or(paths.corpus);
    let highlights = overrides.highlights.clone().unwrap_or(paths.highlights);
    let output = overrides.output.clone().or(paths.output);

    let tokenizer = Tokenizer::with_delimiters(config.tokenizer.delimiter_chars());
    let job = SyncJob::new(corpus, highlights)
        .with_tokenizer(tokenizer)
        .with_indent(config.output.indent);

    match output {
        Some(output) => job.with_output(output),
        None => job,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn root_wins_over_config_dir() {
        let base = base_dir(
            Some(Path::new("/srv/scripts")),
            Some(Path::new("/etc/versemark/versemark.toml")),
        )
        .unwrap();
        assert_eq!(base, PathBuf::from("/srv/scripts"));
    }

    #[test]
    fn config_dir_is_used_without_root() {
        let base = base_dir(None, Some(Path::new("/etc/versemark/versemark.toml"))).unwrap();
        assert_eq!(base, PathBuf::from("/etc/versemark"));
    }

    #[test]
    fn falls_back_to_executable_dir() {
        let base = base_dir(None, None).unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(Some(base.as_path()), exe.parent());
    }

    #[test]
    fn defaults_resolve_against_base() {
        let config = versemark_config::load_defaults().unwrap();
        let job = build_job(&config, &Overrides::default(), Path::new("/app/scripts"));

        assert_eq!(
            job.corpus_path(),
            Path::new("/app/scripts/../public/verses.txt")
        );
        assert_eq!(
            job.highlights_path(),
            Path::new("/app/scripts/../public/highlights.json")
        );
        assert_eq!(job.output_path(), job.highlights_path());
    }

    #[test]
    fn flags_override_config_paths() {
        let config = versemark_config::load_defaults().unwrap();
        let overrides = Overrides {
            corpus: Some(PathBuf::from("verses.txt")),
            output: Some(PathBuf::from("out.json")),
            ..Overrides::default()
        };
        let job = build_job(&config, &overrides, Path::new("/app"));

        assert_eq!(job.corpus_path(), Path::new("verses.txt"));
        assert_eq!(job.highlights_path(), Path::new("/app/../public/highlights.json"));
        assert_eq!(job.output_path(), Path::new("out.json"));
    }

    #[test]
    fn local_config_file_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG_FILENAME), "[output]\nindent = 2\n").unwrap();

        let config = load_config(&Overrides::default(), dir.path()).unwrap();
        assert_eq!(config.output.indent, 2);
    }

    #[test]
    fn indent_flag_beats_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG_FILENAME), "[output]\nindent = 2\n").unwrap();
        let overrides = Overrides {
            indent: Some(8),
            ..Overrides::default()
        };

        let config = load_config(&overrides, dir.path()).unwrap();
        assert_eq!(config.output.indent, 8);
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            config_file: Some(dir.path().join("missing.toml")),
            ..Overrides::default()
        };

        assert!(load_config(&overrides, dir.path()).is_err());
    }
}
