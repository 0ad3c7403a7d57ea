// ABOUTME: Library root for dockwire - container engine client core.
// ABOUTME: The command-line front end is in main.rs.

pub mod auth;
pub mod config;
pub mod connector;
pub mod error;
pub mod params;
pub mod progress;
pub mod types;
