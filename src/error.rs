use thiserror::Error;

pub type MergerResult<T> = Result<T, MergerError>;

#[derive(Error, Debug)]
pub enum MergerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] serde_yaml::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
