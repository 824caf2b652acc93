pub mod app;
pub mod print;
pub mod ui;
