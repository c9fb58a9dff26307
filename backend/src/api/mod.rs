//! API handlers.

pub mod sum;
