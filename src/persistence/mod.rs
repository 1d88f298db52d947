//! This module contains the durable record of previously sent notifications.

pub mod error;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use json_file::JsonFileRecordStore;
pub use memory::InMemoryRecordStore;
pub use traits::{Record, RecordStore};
