use std::fmt;
use std::fmt::{Display, Formatter};

pub type QueryResult<T> = Result<T, QueryError>;

#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    IndexBuild(#[from] linfa_nn::BuildError),
    NearestNeighbour(#[from] linfa_nn::NnError),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let err: &dyn Display = match self {
            QueryError::IndexBuild(err) => err,
            QueryError::NearestNeighbour(err) => err,
        };
        write!(f, "{}", err)
    }
}
