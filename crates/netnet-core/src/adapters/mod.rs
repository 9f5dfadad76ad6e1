//! Provider adapters.

pub mod iex;

pub use iex::{IexCloudAdapter, IexConfig};
