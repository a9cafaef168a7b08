//! Blogfront - blog back end over a hosted database service
//!
//! Blogfront serves the articles of a blog over HTTP:
//! - Posts are read from a PostgREST-style database service
//! - Query outcomes are classified into distinct HTTP errors
//! - Helpers for error logging and date display

pub mod api;
pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod logger;
pub mod posts;
pub mod types;

pub use error::{Error, Result};
