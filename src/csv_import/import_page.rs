use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    alert::Alert,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base},
    navigation::NavBar,
};

/// The name of the multipart field holding the uploaded file.
pub const FILE_FIELD: &str = "file";

fn import_form_view() -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::IMPORT)
            enctype="multipart/form-data"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for=(FILE_FIELD) class=(FORM_LABEL_STYLE)
                {
                    "Choose a CSV file to upload"
                }

                input
                    id=(FILE_FIELD)
                    type="file"
                    name=(FILE_FIELD)
                    accept=".csv,text/csv"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p class="mt-2 text-sm"
                {
                    "The file needs a header row followed by the columns Date, Category, \
                    Amount and Description, the same as an exported file."
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Upload File" }
        }
    }
}

/// The import page, with an optional alert describing why the last upload failed.
pub fn import_view(alert: Option<Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::IMPORT).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Import Expenses" }

            div id="alert-container" class="w-full"
            {
                @if let Some(alert) = alert {
                    (alert.into_html())
                }
            }

            (import_form_view())
        }
    };

    base("Import Expenses", &content)
}

/// Route handler for the import CSV page.
pub async fn get_import_page() -> Response {
    import_view(None).into_response()
}
