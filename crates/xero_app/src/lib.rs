//! Xero demo host
//!
//! Configuration loading and the headless demo scene behind the `xero` binary.

pub mod config;
pub mod demo;

pub use config::XeroConfig;
pub use demo::{demo_items, Demo, DemoItem, FlingReport};
