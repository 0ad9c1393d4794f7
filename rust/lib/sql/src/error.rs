use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    /// The database parsed the statement and refused it. The message is the
    /// database's own diagnostic, unmodified.
    #[error("{0}")]
    Query(String),

    /// The database could not be reached, or did not answer in time.
    #[error("connection error: {0}")]
    Connection(String),
}
