//! Core library for taskdeck: configuration, session storage, the HTTP client
//! for the tasks backend, and pure views over task lists.

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod tasks;
