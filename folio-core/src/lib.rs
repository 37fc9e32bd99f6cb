//! Folio core library: project store, query layer, session guard and storage.
//!
//! The main entry point is [`store::ProjectStore`], which owns the project
//! list and persists it through a [`storage::SlotStorage`] backend.

pub mod config;
pub mod embed;
pub mod error;
pub mod query;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;
pub mod types;
