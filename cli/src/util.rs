use serde::Serialize;
use social_graph_core::{parse_degree, QueryError};

/// What a command prints and whether it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub body: String,
    pub ok: bool,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

/// Parse an optional degree argument. `None` keeps the operation's default.
pub fn degree_arg(raw: Option<&str>) -> Result<Option<i64>, QueryError> {
    raw.map(|r| parse_degree(r).map(i64::from)).transpose()
}

/// Stable machine-readable name for a query error.
pub fn error_code(err: &QueryError) -> &'static str {
    match err {
        QueryError::InvalidDegree(_) => "InvalidDegree",
        QueryError::MissingParameter(_) => "MissingParameter",
        QueryError::EmptyGraph => "EmptyGraph",
        QueryError::NotLoaded => "NotLoaded",
    }
}

/// Pretty JSON for a result, or the error object for a query error.
pub fn render<T: Serialize>(result: Result<T, QueryError>) -> serde_json::Result<Reply> {
    match result {
        Ok(value) => Ok(Reply {
            body: serde_json::to_string_pretty(&value)?,
            ok: true,
        }),
        Err(err) => Ok(Reply {
            body: serde_json::to_string_pretty(&ErrorBody {
                error: error_code(&err),
                message: err.to_string(),
            })?,
            ok: false,
        }),
    }
}
