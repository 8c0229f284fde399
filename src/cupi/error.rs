use thiserror::Error;

use crate::cupi::webcallresult::WebCallResult;

/// Rejected change to a record field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{type_name} has no field named {field}")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },
    #[error("{field} on {type_name} is read only")]
    ReadOnly {
        type_name: &'static str,
        field: &'static str,
    },
    #[error("{value:?} is not a valid {expected} value for {field}")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Binding a record to an existing resource failed.
///
/// This is the only place the crate uses an error type instead of a [`WebCallResult`]:
/// a bound record is returned by value, so there is nowhere else to put the failure.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("empty object id and lookup name passed for {type_name}")]
    MissingIdentifier { type_name: &'static str },
    #[error("{type_name} has no lookup field; an object id is required")]
    NoLookupField { type_name: &'static str },
    #[error("no {type_name} found for {identifier}")]
    NotFound {
        type_name: &'static str,
        identifier: String,
    },
    #[error("{count} {type_name} records match {identifier}")]
    Ambiguous {
        type_name: &'static str,
        identifier: String,
        count: usize,
    },
    #[error("failed to fetch {type_name}: {result}")]
    Call {
        type_name: &'static str,
        result: Box<WebCallResult>,
    },
}
