use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("transition references unknown state: {0}")]
    UnknownState(String),

    #[error("duplicate state name: {0}")]
    DuplicateState(String),

    #[error("brain has no states")]
    EmptyBrain,

    #[error("{strategy} requires the {ability} ability")]
    MissingAbility {
        strategy: &'static str,
        ability: &'static str,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("strategy failure in {strategy}: {reason}")]
    Strategy {
        strategy: &'static str,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AiError>;
