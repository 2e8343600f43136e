pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{card, copy_block, stat_card, status_badge, status_form};
pub use layouts::desktop::{desktop_layout, Section};
