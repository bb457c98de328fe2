use thiserror::Error;

#[derive(Error, Debug)]
pub enum EasyPayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Unknown loan firm: {0}")]
    UnknownLoanFirm(u32),

    #[error("Invalid deposit: {0}% (choose one of {1})")]
    InvalidDeposit(u32, String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, EasyPayError>;
