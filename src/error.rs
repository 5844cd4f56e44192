use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn input text into an [`SvgAst`](crate::SvgAst).
///
/// `line` and `column` are 1-based and best-effort: they are only filled in
/// when the XML reader reported the offset of the problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Attach a position derived from a byte offset into `source`.
    pub fn at_offset(mut self, source: &str, offset: usize) -> Self {
        let bytes = &source.as_bytes()[..offset.min(source.len())];
        let line_start = bytes.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        self.line = Some(bytes.iter().filter(|&&b| b == b'\n').count() + 1);
        self.column = Some(bytes.len() - line_start + 1);
        self
    }
}

#[derive(Debug, Error)]
pub enum Svg2TsxError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Only SVG files are allowed: `{0}`")]
    NotSvgFile(PathBuf),

    #[error("File must have .tsx extension: `{0}`")]
    NotTsxFile(PathBuf),

    #[error("File not found: `{0}`")]
    NotFound(PathBuf),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config file serialization error")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Coarse classification used when presenting an error to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    File,
    Config,
}

impl ErrorKind {
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Parse => "Could not parse the SVG code. Check that it is valid SVG markup.",
            Self::File => "Something went wrong while reading or writing a file.",
            Self::Config => "The options file could not be read or written.",
        }
    }
}

impl Svg2TsxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::NotSvgFile(_) | Self::NotTsxFile(_) | Self::NotFound(_) | Self::Io(..) => {
                ErrorKind::File
            }
            Self::ConfigParse(_) | Self::ConfigSerialize(_) => ErrorKind::Config,
        }
    }
}
