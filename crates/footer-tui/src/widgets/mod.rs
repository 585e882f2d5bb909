pub mod label;
pub mod pane_chrome;
pub mod status_bar;
