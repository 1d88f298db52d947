#![warn(missing_docs)]
//! Slacker posts notifications to a chat webhook and suppresses repeats of the
//! same message within an hour or a day, using a record kept on disk.

pub mod config;
pub mod dedup;
pub mod fingerprint;
pub mod http_client;
pub mod models;
pub mod notification;
pub mod persistence;
pub mod test_helpers;
