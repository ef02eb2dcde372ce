//! A filtered, searchable track list for the terminal.
//!
//! The engine is `songlist` (filtering, search, selection, sorting) on top of
//! `matcher` and `cursor`. `app`, `ui` and `runtime` put it on screen.

pub mod app;
pub mod config;
pub mod cursor;
pub mod error;
pub mod library;
pub mod matcher;
pub mod runtime;
pub mod songlist;
pub mod ui;
