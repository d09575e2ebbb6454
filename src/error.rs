use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("envvar SLACK_TOKEN is not set")]
    MissingToken,

    #[error("could not validate auth token: {0}")]
    Auth(String),

    #[error("slack responded with an error: {0}")]
    Api(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        source: serde_json::Error,
    },

    #[error("could not determine a downloads directory, pass --output")]
    NoOutputDir,
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
