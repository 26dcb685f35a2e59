//! Command handlers

pub mod config;
pub mod record;
pub mod settings;
pub mod status;
pub mod vendor;
