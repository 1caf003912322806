use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("already voted")]
    Conflict,

    #[error("server error: {0}")]
    Server(StatusCode),

    #[error("unknown gadget: {0}")]
    UnknownGadget(String),

    #[error("identity error: {0}")]
    Auth(String),

    #[error("not signed in")]
    MissingCredentials,
}
