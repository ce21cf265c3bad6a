//! HTTP surface for verse studies.
//!
//! Routes are nested under `/api/`; the root path answers with a
//! service banner.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;
