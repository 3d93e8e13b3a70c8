// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_message;
pub mod code_snippet;
pub mod config;
pub mod constants;
pub mod controller;
pub mod conversation;
pub mod errors;
pub mod format;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod reveal;
pub mod status_indicator;
pub mod ui;

pub use app::{App, AppEvent};
