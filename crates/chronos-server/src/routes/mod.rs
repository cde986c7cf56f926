pub mod activities;
pub mod config;
pub mod events;
pub mod health;
pub mod schedule;
pub mod templates;
