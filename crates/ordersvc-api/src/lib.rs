//! ordersvc-api: Orders application core + inbound HTTP adapter.

pub mod config;
pub mod errors;

pub mod application;

pub use ordersvc_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
