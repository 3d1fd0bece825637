use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    Io(#[from] std::io::Error),
    Json(#[from] serde_json::Error),
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let err: &dyn Display = match self {
            DatasetError::Io(err) => err,
            DatasetError::Json(err) => err,
        };
        write!(f, "{}", err)
    }
}
