pub mod app;
pub mod config;
pub mod data;
pub mod export;
pub mod format;
pub mod render;
pub mod state;
pub mod ui;
