pub mod css;
pub mod errors;
pub mod html;
pub mod json;
pub mod xlsx;

pub use css::{css_response, MAIN_CSS};
pub use errors::{error_status, html_error_response, ResultResp};
pub use html::{html_response, redirect};
pub use json::json_response;
pub use xlsx::xlsx_response;
