use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Parse error at `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Schema error: unknown cursor bucket {key:?} (expected one of 2..=10 or \">10\")")]
    Schema { key: String },
    #[error("Conversion error: edit count {key:?} {reason}")]
    Conversion { key: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(String),
}

impl From<serde_path_to_error::Error<serde_json::Error>> for PlotError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        PlotError::Parse {
            path,
            source: err.into_inner(),
        }
    }
}
