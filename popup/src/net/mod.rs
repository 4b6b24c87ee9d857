//! Browser networking.

#[cfg(feature = "csr")]
pub mod fetch;
