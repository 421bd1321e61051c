use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No route candidates supplied")]
    NoCandidates,
    #[error("Route geometry contains no points")]
    EmptyGeometry,
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
