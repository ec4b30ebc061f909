pub mod compose;
pub mod config;
pub mod runtime;
pub mod service;
pub mod substitute;
