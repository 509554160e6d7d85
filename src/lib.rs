pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod sanitize;
pub mod timefmt;
pub mod ui;
