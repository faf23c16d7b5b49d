use thiserror::Error;

#[derive(Error, Debug)]
pub enum KlaxonError {
    #[error("Data access error. Error message: `{0}`")]
    DataAccess(String),
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("Invalid state. Error message: `{0}`")]
    InvalidState(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}
