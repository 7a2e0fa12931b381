pub mod header;
pub mod response_panel;
pub mod status_bar;
pub mod style;
