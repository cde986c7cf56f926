pub mod activity;
pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod planner;
pub mod schedule;
pub mod store;
pub mod template;
pub mod types;

pub use error::{ChronosError, Result};
