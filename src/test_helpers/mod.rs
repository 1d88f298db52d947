//! A set of helpers for testing

mod clock;
mod notifier;

pub use clock::MutableClock;
pub use notifier::{create_test_config, create_test_notifier};
