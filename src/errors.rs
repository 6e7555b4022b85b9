#[derive(Debug, thiserror::Error)]
pub enum DatePickerError {
    #[error("Control not found: {0}")]
    ControlNotFound(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid control value {0:?}, expected YYYY-MM-DD")]
    InvalidControlValue(String),

    #[error("Date out of range")]
    DateOutOfRange,
}
