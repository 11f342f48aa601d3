use std::time::Instant;

use axum::{
    extract::{Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use csv::ReaderBuilder;
use rusqlite::Connection;

use crate::{
    Error,
    alert::Alert,
    app_state::LedgerState,
    csv_format::from_row,
    csv_import::import_page::{FILE_FIELD, import_view},
    endpoints,
    expense::{NewExpense, create_expenses},
};

/// What happened to an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Every row of the file was saved as a new expense.
    Imported(usize),
    /// The file name does not end in `.csv`, so nothing was read.
    NotCsv,
}

/// Import every data row of the CSV file `bytes` as a new expense.
///
/// The first row is a header and is skipped. Every row is parsed before
/// anything is written, and the expenses are saved in a single transaction,
/// so either the whole file is imported or none of it is.
///
/// Returns [ImportOutcome::NotCsv] without reading `bytes` if `file_name`
/// does not have a `.csv` extension.
///
/// # Errors
/// Returns an [Error::ImportError] naming the first row that is not valid
/// UTF-8 or cannot be parsed (the header is row 0, the first data row is
/// row 1), or an [Error::SqlError] if the expenses could not be saved.
pub fn import_csv(
    bytes: &[u8],
    file_name: &str,
    connection: &Connection,
) -> Result<ImportOutcome, Error> {
    if !has_csv_extension(file_name) {
        return Ok(ImportOutcome::NotCsv);
    }

    let new_expenses = parse_csv(bytes)?;
    let imported = create_expenses(new_expenses, connection)?;

    Ok(ImportOutcome::Imported(imported))
}

fn has_csv_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, extension)| !stem.is_empty() && extension.eq_ignore_ascii_case("csv"))
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<NewExpense>, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut new_expenses = Vec::new();

    // Records are numbered from the header, so the index is also the data row number.
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|error| Error::ImportError {
            row,
            reason: error.to_string(),
        })?;

        if row == 0 {
            continue;
        }

        new_expenses.push(from_row(&record, row)?);
    }

    Ok(new_expenses)
}

/// Route handler for importing expenses from an uploaded CSV file.
///
/// Redirects to the expense list once the file is imported. Otherwise the
/// import page is shown again with an alert explaining what went wrong.
pub async fn import_expenses_endpoint(
    State(state): State<LedgerState>,
    multipart: Multipart,
) -> Response {
    let start_time = Instant::now();

    let (file_name, bytes) = match read_uploaded_file(multipart).await {
        Ok(upload) => upload,
        Err(error) => return render_import_error(error),
    };

    let outcome = {
        let connection = match state.connection() {
            Ok(connection) => connection,
            Err(error) => return error.into_response(),
        };

        import_csv(&bytes, &file_name, &connection)
    };

    match outcome {
        Ok(ImportOutcome::Imported(count)) => {
            tracing::info!(
                "Imported {count} expenses from '{file_name}' in {}ms",
                start_time.elapsed().as_millis()
            );
            Redirect::to(endpoints::ROOT).into_response()
        }
        Ok(ImportOutcome::NotCsv) => {
            tracing::debug!("Rejected upload '{file_name}' because it is not a CSV file");
            (
                StatusCode::BAD_REQUEST,
                import_view(Some(Alert::ErrorSimple {
                    message: "File type must be CSV.".to_owned(),
                })),
            )
                .into_response()
        }
        Err(error) => {
            tracing::debug!("Failed to import '{file_name}': {error}");
            render_import_error(error)
        }
    }
}

fn render_import_error(error: Error) -> Response {
    if !error.is_client_error() {
        return error.into_response();
    }

    let (status_code, alert) = error.into_alert();

    (status_code, import_view(Some(alert))).into_response()
}

async fn read_uploaded_file(mut multipart: Multipart) -> Result<(String, Vec<u8>), Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.body_text()))?
    {
        if field.name() == Some(FILE_FIELD) {
            return read_file_field(field).await;
        }
    }

    Err(Error::MultipartError(
        "the form did not include a file".to_owned(),
    ))
}

async fn read_file_field(field: Field<'_>) -> Result<(String, Vec<u8>), Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();

    let data = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError(error.body_text())
    })?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    Ok((file_name, data.to_vec()))
}

#[cfg(test)]
mod import_csv_tests {
    use time::macros::date;

    use crate::{
        Error,
        app_state::LedgerState,
        csv_export::export_expenses,
        expense::{Expense, count_expenses, create_expense, get_all_expenses},
    };

    use super::{ImportOutcome, import_csv};

    #[test]
    fn imports_every_data_row() {
        let state = LedgerState::in_memory();
        let connection = state.connection().unwrap();
        let csv = "Date,Category,Amount,Description\n\
            2024-01-15,Food,12.5,Lunch\n\
            2024-01-16,Transport,-3,\n\
            2024-01-17,Rent,1200\n";

        let got = import_csv(csv.as_bytes(), "expenses.csv", &connection);

        assert_eq!(got, Ok(ImportOutcome::Imported(3)));
        let expenses = get_all_expenses(&connection).unwrap();
        let got: Vec<_> = expenses
            .iter()
            .map(|expense| {
                (
                    expense.date,
                    expense.category.as_str(),
                    expense.amount,
                    expense.description.as_str(),
                )
            })
            .collect();
        assert_eq!(
            got,
            vec![
                (date!(2024 - 01 - 17), "Rent", 1200.0, ""),
                (date!(2024 - 01 - 16), "Transport", -3.0, ""),
                (date!(2024 - 01 - 15), "Food", 12.5, "Lunch"),
            ]
        );
    }

    #[test]
    fn header_only_imports_nothing() {
        let state = LedgerState::in_memory();
        let connection = state.connection().unwrap();

        let got = import_csv(b"Date,Category,Amount,Description\n", "a.csv", &connection);

        assert_eq!(got, Ok(ImportOutcome::Imported(0)));
        assert_eq!(count_expenses(&connection), Ok(0));
    }

    #[test]
    fn extension_check_ignores_case() {
        let state = LedgerState::in_memory();
        let connection = state.connection().unwrap();
        let csv = b"Date,Category,Amount,Description\n2024-01-15,Food,1,\n";

        let got = import_csv(csv, "EXPENSES.CSV", &connection);

        assert_eq!(got, Ok(ImportOutcome::Imported(1)));
    }

    #[test]
    fn non_csv_file_is_ignored() {
        let state = LedgerState::in_memory();
        let connection = state.connection().unwrap();
        let csv = b"Date,Category,Amount,Description\n2024-01-15,Food,1,\n";

        for file_name in ["expenses.txt", "expenses", "csv", ".csv", "expenses.csv.bak"] {
            let got = import_csv(csv, file_name, &connection);

            assert_eq!(got, Ok(ImportOutcome::NotCsv), "for file name {file_name:?}");
        }
        assert_eq!(count_expenses(&connection), Ok(0));
    }

    #[test]
    fn malformed_row_aborts_whole_import() {
        let state = LedgerState::in_memory();
        let connection = state.connection().unwrap();
        let csv = "Date,Category,Amount,Description\n\
            2024-01-15,Food,12.5,Lunch\n\
            2024-01-16,Food,3,Coffee\n\
            2024-01-17,Food,not money,Dinner\n";

        let got = import_csv(csv.as_bytes(), "expenses.csv", &connection);

        assert!(
            matches!(got, Err(Error::ImportError { row: 3, .. })),
            "want import error on row 3, got {got:?}"
        );
        assert_eq!(count_expenses(&connection), Ok(0));
    }

    #[test]
    fn invalid_utf8_reports_row() {
        let state = LedgerState::in_memory();
        let connection = state.connection().unwrap();
        let mut csv = b"Date,Category,Amount,Description\n2024-01-15,Food,1,Lunch\n".to_vec();
        csv.extend_from_slice(b"2024-01-16,Food,2,Caf\xe9\n");

        let got = import_csv(&csv, "expenses.csv", &connection);

        assert!(
            matches!(got, Err(Error::ImportError { row: 2, .. })),
            "want import error on row 2, got {got:?}"
        );
        assert_eq!(count_expenses(&connection), Ok(0));
    }

    #[test]
    fn invalid_utf8_in_header_is_row_zero() {
        let state = LedgerState::in_memory();
        let connection = state.connection().unwrap();

        let got = import_csv(b"D\xffte,Category\n", "expenses.csv", &connection);

        assert!(
            matches!(got, Err(Error::ImportError { row: 0, .. })),
            "want import error on row 0, got {got:?}"
        );
    }

    #[test]
    fn imported_expenses_get_fresh_ids() {
        let state = LedgerState::in_memory();
        let connection = state.connection().unwrap();
        let existing = create_expense(
            Expense::build(1.0, "Food", date!(2024 - 01 - 15)),
            &connection,
        )
        .unwrap();
        let csv = "Date,Category,Amount,Description\n2024-01-15,Food,1,\n2024-01-15,Food,2,\n";

        import_csv(csv.as_bytes(), "expenses.csv", &connection).expect("could not import");

        let ids: Vec<_> = get_all_expenses(&connection)
            .unwrap()
            .into_iter()
            .map(|expense| expense.id)
            .collect();
        assert_eq!(ids, vec![existing.id, existing.id + 1, existing.id + 2]);
    }

    #[test]
    fn export_then_import_reproduces_expenses() {
        let source = LedgerState::in_memory();
        let source_connection = source.connection().unwrap();
        for new_expense in [
            Expense::build(12.5, "Food", date!(2024 - 01 - 15)).description("Lunch"),
            Expense::build(0.1, "Food", date!(2024 - 01 - 15)).description("Gum, \"mint\""),
            Expense::build(-20.0, "Refunds", date!(2024 - 03 - 02)),
            Expense::build(1.0 / 3.0, "Misc", date!(2023 - 12 - 31)).description("Line\nbreak"),
        ] {
            create_expense(new_expense, &source_connection).unwrap();
        }
        let csv = export_expenses(&source_connection).expect("could not export");

        let destination = LedgerState::in_memory();
        let destination_connection = destination.connection().unwrap();
        let got = import_csv(&csv, "expenses.csv", &destination_connection);

        assert_eq!(got, Ok(ImportOutcome::Imported(4)));
        let fields = |expenses: Vec<Expense>| {
            expenses
                .into_iter()
                .map(|expense| {
                    (
                        expense.amount,
                        expense.category,
                        expense.date,
                        expense.description,
                    )
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(
            fields(get_all_expenses(&destination_connection).unwrap()),
            fields(get_all_expenses(&source_connection).unwrap())
        );
    }
}
