use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Dates must be in YYYY-MM-DD format")]
    InvalidDateFormat(String),

    #[error("start_date must be before end_date")]
    NonChronologicalRange,

    #[error("date older than the record")]
    DateOutOfRange,
}
