//! Status code classes.

use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// The class of a status code, given by its first digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    Informational,
    Successful,
    Redirection,
    ClientError,
    ServerError,
}

impl Series {
    /// Classify a status code. Codes outside 1xx-5xx have no series.
    pub fn of(status: StatusCode) -> Option<Series> {
        match status.as_u16() / 100 {
            1 => Some(Series::Informational),
            2 => Some(Series::Successful),
            3 => Some(Series::Redirection),
            4 => Some(Series::ClientError),
            5 => Some(Series::ServerError),
            _ => None,
        }
    }

    /// True if `status` belongs to this series.
    pub fn contains(self, status: StatusCode) -> bool {
        Series::of(status) == Some(self)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Series::Informational => "informational",
            Series::Successful => "successful",
            Series::Redirection => "redirection",
            Series::ClientError => "client_error",
            Series::ServerError => "server_error",
        };
        f.write_str(name)
    }
}
