//! ordersvc-types: domain records and the repository port.

pub mod domain;
pub mod ports;
