//! Defines the route handler for the page listing every expense.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::LedgerState,
    endpoints::{self, format_endpoint},
    expense::{
        Expense,
        core::get_all_expenses,
        form::{ExpenseFormDefaults, expense_form_fields},
    },
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
        truncate_description,
    },
    navigation::NavBar,
};

fn expense_row_view(expense: &Expense) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_EXPENSE, expense.id);
    let delete_url = format_endpoint(endpoints::DELETE_EXPENSE, expense.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class=(TABLE_CELL_STYLE) { (expense.date) }
            td class=(TABLE_CELL_STYLE) { (expense.category) }
            td class="px-6 py-4 text-right" { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE) title=(expense.description)
            {
                (truncate_description(&expense.description))
            }
            td class="px-6 py-4 space-x-2"
            {
                a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                a href=(delete_url) class=(BUTTON_DELETE_STYLE) { "Delete" }
            }
        }
    }
}

fn expenses_view(expenses: &[Expense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let total: f64 = expenses.iter().map(|expense| expense.amount).sum();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md mb-8"
            {
                form
                    method="post"
                    action=(endpoints::ADD_EXPENSE)
                    class="w-full space-y-4"
                {
                    h2 class="text-xl font-bold" { "Add Expense" }

                    (expense_form_fields(&ExpenseFormDefaults::default()))

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
                }
            }

            section class="w-full lg:max-w-5xl space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Expenses" }

                    a href=(endpoints::IMPORT) class=(LINK_STYLE) { "Import CSV" }

                    a href=(endpoints::EXPORT) class=(LINK_STYLE) { "Export CSV" }
                }

                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class="px-6 py-4 text-right" { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for expense in expenses {
                            (expense_row_view(expense))
                        }

                        @if expenses.is_empty() {
                            tr
                            {
                                td colspan="5" data-empty-state="true" class="px-6 py-4 text-center"
                                {
                                    "No expenses yet."
                                }
                            }
                        }
                    }

                    tfoot
                    {
                        tr class="font-semibold text-gray-900 dark:text-white"
                        {
                            th scope="row" colspan="2" class=(TABLE_CELL_STYLE) { "Total" }
                            td id="total" class="px-6 py-4 text-right" { (format_currency(total)) }
                            td colspan="2" {}
                        }
                    }
                }
            }
        }
    };

    base("Expenses", &content)
}

/// Renders the list of every expense, most recent first.
pub async fn get_expenses_page(State(state): State<LedgerState>) -> Result<Response, Error> {
    let expenses = {
        let connection = state.connection()?;
        get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?
    };

    Ok(expenses_view(&expenses).into_response())
}
