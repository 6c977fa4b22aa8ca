//! Route record management.
//!
//! Routes are records (start point, finish point, route number) kept in a
//! single XML data file.

pub mod domain;
pub use domain::{Catalog, Route};

/// XML persistence for route catalogs.
pub mod storage;
pub use storage::LoadError;

/// Fixed-width table rendering for route catalogs.
pub mod table;
