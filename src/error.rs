//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, html::error_view, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount of an expense was missing, not a number, or not finite.
    ///
    /// Negative amounts are allowed so that refunds can be recorded.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The category of an expense was empty.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// The date of an expense was not in the format YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// A row in an uploaded CSV file could not be parsed.
    ///
    /// `row` is the 1-based index of the data row (the header is row 0).
    /// No expenses from the file are saved when this error occurs.
    #[error("could not import row {row}: {reason}")]
    ImportError {
        /// The 1-based index of the offending data row.
        row: usize,
        /// Why the row could not be parsed.
        reason: String,
    },

    /// An expense could not be written as CSV, e.g., its amount is not finite.
    #[error("could not export expenses as CSV: {0}")]
    SerializationError(String),

    /// The multipart form could not be parsed.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// Whether the error was caused by bad input from the client.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAmount(_)
                | Error::EmptyCategory
                | Error::InvalidDate(_)
                | Error::ImportError { .. }
                | Error::MultipartError(_)
        )
    }

    /// Convert the error into an alert and the status code it should be sent with.
    pub fn into_alert(self) -> (StatusCode, Alert) {
        match self {
            Error::ImportError { row, reason } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Import failed".to_owned(),
                    details: format!(
                        "Row {row} could not be imported: {reason}. \
                        No expenses were imported, fix the file and try again."
                    ),
                },
            ),
            Error::MultipartError(details) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not read the uploaded file".to_owned(),
                    details,
                },
            ),
            error if error.is_client_error() => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid expense".to_owned(),
                    details: error.to_string(),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Expense not found".to_owned(),
                    details: "The expense could not be found. \
                    Try refreshing the page to see if it has already been deleted."
                        .to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::SerializationError(details) => {
                tracing::error!("Could not export expenses: {details}");
                InternalServerError {
                    description: "Export Failed",
                    fix: "One or more expenses could not be written as CSV, check the server logs.",
                }
                .into_response()
            }
            error if error.is_client_error() => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Bad Request",
                    "400",
                    "Invalid expense",
                    &format!("The expense was not saved: {error}."),
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
