//! Configuration for a converter run.
//!
//! All behaviour is controlled through [`ConvertConfig`], built via its
//! [`ConvertConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config between the CLI and tests and to diff two runs
//! to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field.
//! The builder lets callers set only what they care about and rely on
//! documented defaults for the rest.

use crate::capability::Capabilities;
use crate::error::ConvertError;
use std::fmt;
use std::path::PathBuf;

/// Name of the reserved subdirectory holding image binaries. Files already
/// under it are excluded from scanning; image artifacts are copied into it.
pub const IMAGES_DIR: &str = "images";

/// How CSV artifacts are passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvMode {
    /// Copy the file byte-for-byte, keeping the `.csv` extension. (default)
    #[default]
    Copy,
    /// Wrap the raw content in a fenced code block under a "CSV Data"
    /// heading, producing a `.md` document.
    Fenced,
}

/// Configuration for one conversion run.
///
/// Built via [`ConvertConfig::builder()`].
///
/// # Example
/// ```rust
/// use artifact2md::ConvertConfig;
///
/// let config = ConvertConfig::builder("raw-artifacts")
///     .recursive(true)
///     .tool_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConvertConfig {
    /// Root directory holding the artifacts to convert.
    pub input_dir: PathBuf,

    /// Output root. Defaults to `<input_dir>/converted` when `None`.
    pub output_dir: Option<PathBuf>,

    /// Recurse into subdirectories, mirroring the relative structure under
    /// the output root. Default: false (top level only).
    pub recursive: bool,

    /// Up-to-date shortcut: skip a file whose destination already exists
    /// with a strictly newer modification time. Default: true.
    ///
    /// Disable (`--force`) to reconvert everything regardless of mtimes.
    pub incremental: bool,

    /// CSV pass-through variant. Default: [`CsvMode::Copy`].
    pub csv_mode: CsvMode,

    /// Program name (or path) of the external conversion tool used for
    /// PPTX. Default: `"pandoc"`. Resolved through PATH at call time; its
    /// absence is a per-file failure, never a startup error.
    pub tool_program: String,

    /// Timeout for one external tool invocation, in seconds. Default: 60.
    ///
    /// On timeout the invocation counts as a conversion failure for that
    /// file; the batch continues and nothing is retried.
    pub tool_timeout_secs: u64,

    /// Parsing capabilities. Default: [`Capabilities::detect()`] — whatever
    /// the enabled cargo features provide. Tests inject stand-ins here.
    pub capabilities: Capabilities,
}

impl ConvertConfig {
    /// Create a builder rooted at `input_dir`.
    pub fn builder(input_dir: impl Into<PathBuf>) -> ConvertConfigBuilder {
        ConvertConfigBuilder {
            config: ConvertConfig {
                input_dir: input_dir.into(),
                output_dir: None,
                recursive: false,
                incremental: true,
                csv_mode: CsvMode::default(),
                tool_program: "pandoc".to_string(),
                tool_timeout_secs: 60,
                capabilities: Capabilities::detect(),
            },
        }
    }

    /// The effective output root (`<input_dir>/converted` unless overridden).
    pub fn output_root(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.input_dir.join("converted"))
    }

    /// The reserved directory image binaries are copied into.
    pub fn images_dir(&self) -> PathBuf {
        self.input_dir.join(IMAGES_DIR)
    }
}

impl fmt::Debug for ConvertConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertConfig")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("recursive", &self.recursive)
            .field("incremental", &self.incremental)
            .field("csv_mode", &self.csv_mode)
            .field("tool_program", &self.tool_program)
            .field("tool_timeout_secs", &self.tool_timeout_secs)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// Builder for [`ConvertConfig`].
#[derive(Debug)]
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    pub fn recursive(mut self, v: bool) -> Self {
        self.config.recursive = v;
        self
    }

    pub fn incremental(mut self, v: bool) -> Self {
        self.config.incremental = v;
        self
    }

    pub fn csv_mode(mut self, mode: CsvMode) -> Self {
        self.config.csv_mode = mode;
        self
    }

    pub fn tool_program(mut self, program: impl Into<String>) -> Self {
        self.config.tool_program = program.into();
        self
    }

    pub fn tool_timeout_secs(mut self, secs: u64) -> Self {
        self.config.tool_timeout_secs = secs.max(1);
        self
    }

    pub fn capabilities(mut self, caps: Capabilities) -> Self {
        self.config.capabilities = caps;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConvertConfig, ConvertError> {
        let c = &self.config;
        if c.input_dir.as_os_str().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "input directory must not be empty".into(),
            ));
        }
        if c.tool_program.is_empty() {
            return Err(ConvertError::InvalidConfig(
                "tool program must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
