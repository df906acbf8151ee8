use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaveDroidError {
    #[error("Invalid WaveDroid data at line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Required field '{0}' is missing from the header")]
    MissingField(&'static str),

    #[error("Failed to adapt parsed data: {0}")]
    ContainerAdaptation(String),

    #[error("Invalid reader configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WaveDroidError {
    pub fn format(line: usize, reason: impl Into<String>) -> Self {
        WaveDroidError::Format {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WaveDroidError>;

/// A single data row that can be built from its split fields, given the metadata
/// parsed from the file header
pub trait ParseableDataRecord {
    type Metadata;

    fn from_data_row(metadata: &Self::Metadata, line: usize, row: &[&str]) -> Result<Self>
    where
        Self: Sized;
}
