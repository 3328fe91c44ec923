#[macro_use]
pub mod macros;

pub mod api;
pub mod cache;
pub mod config;
pub mod dates_parser;
pub mod error;
pub mod export;
pub mod ranking;
pub mod schema;
