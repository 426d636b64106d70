// Clip Vault - Library Entry Point

pub mod constants;
pub mod error;
pub mod config;
pub mod hash;
pub mod classify;
pub mod catalog;
pub mod store;
pub mod ingest;
pub mod watch;
