//! The URIs served by the app.
//!
//! For endpoints that take a parameter, e.g., '/edit/{expense_id}', use [format_endpoint].

/// The list of all expenses, with a form for adding a new one.
pub const ROOT: &str = "/";
/// The route for creating a new expense.
pub const ADD_EXPENSE: &str = "/add";
/// The page and form target for editing an existing expense.
pub const EDIT_EXPENSE: &str = "/edit/{expense_id}";
/// The route for deleting an expense.
pub const DELETE_EXPENSE: &str = "/delete/{expense_id}";
/// The route for downloading all expenses as a CSV file.
pub const EXPORT: &str = "/export";
/// The page and form target for importing expenses from a CSV file.
pub const IMPORT: &str = "/import";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace, e.g.
/// '{expense_id}' in '/edit/{expense_id}'. Only the first parameter is
/// replaced. If no parameter is found, `endpoint_path` is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
