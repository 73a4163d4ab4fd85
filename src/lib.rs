pub mod app;
pub mod catalog;
pub mod config;
pub mod keyboard;
pub mod matcher;
pub mod picker;
pub mod route;
pub mod seasons;
pub mod state;
pub mod ui;
