//! Autovault application: document store adapters, configuration, logging
//! and the interactive terminal session.

pub mod config;
pub mod context;
pub mod firestore;
pub mod observability;
pub mod session;
pub mod shutdown;
pub mod terminal;
