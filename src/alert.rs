//! Alerts for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments that can be embedded in a page.

use maud::{Markup, html};

const ALERT_ERROR_STYLE: &str = "p-4 mb-4 rounded border text-red-800 border-red-300 \
    bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

/// An error message with optional details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error message with details.
    Error { message: String, details: String },
    /// An error message without details.
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, Some(details)),
            Alert::ErrorSimple { message } => (message, None),
        };

        html! {
            div id="alert" role="alert" class=(ALERT_ERROR_STYLE)
            {
                p class="text-sm font-medium" { (message) }

                @if let Some(details) = details {
                    @if !details.is_empty() {
                        p class="mt-1 text-sm opacity-80" { (details) }
                    }
                }
            }
        }
    }
}
