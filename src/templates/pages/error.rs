use crate::templates::{desktop_layout, Section};
use maud::{html, Markup};

pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        Section::None,
        html! {
            h1 { "Error " (status) }
            p { (message) }
            p { a href="/dashboard" { "← Back to dashboard" } }
        },
    )
}
