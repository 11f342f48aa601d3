//! Exports the whole expense ledger as a CSV file.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use csv::Writer;
use rusqlite::Connection;

use crate::{
    Error,
    app_state::LedgerState,
    csv_format::{COLUMNS, to_row},
    expense::get_all_expenses,
};

/// The name the browser saves the exported file as.
const EXPORT_FILE_NAME: &str = "expenses.csv";

/// Write every expense as CSV, most recent first, after a header row.
///
/// Either every expense is written or the export fails.
///
/// # Errors
/// Returns [Error::SerializationError] if an expense cannot be written,
/// e.g. its amount is not finite, or [Error::SqlError] if the expenses
/// cannot be read.
pub fn export_expenses(connection: &Connection) -> Result<Vec<u8>, Error> {
    let expenses = get_all_expenses(connection)?;
    let mut writer = Writer::from_writer(Vec::new());

    writer
        .write_record(COLUMNS)
        .map_err(|error| Error::SerializationError(error.to_string()))?;

    for expense in &expenses {
        writer
            .write_record(to_row(expense)?)
            .map_err(|error| Error::SerializationError(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::SerializationError(error.to_string()))
}

/// Route handler that downloads every expense as `expenses.csv`.
pub async fn get_export(State(state): State<LedgerState>) -> Result<Response, Error> {
    let csv_data = {
        let connection = state.connection()?;
        export_expenses(&connection)?
    };

    tracing::debug!("Exported {} bytes of CSV", csv_data.len());

    Ok((
        [
            (CONTENT_TYPE, "text/csv".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv_data,
    )
        .into_response())
}
