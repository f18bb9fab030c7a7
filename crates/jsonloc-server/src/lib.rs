//! # jsonloc Server
//!
//! HTTP service exposing localized strings from the jsonloc engine.
//!
//! The active culture of each request is negotiated from its
//! `Accept-Language` header and carried with the request, so concurrent
//! requests in different languages never share state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod routes;
pub mod server;

pub use error::*;
pub use routes::{create_router, AppState, StatsResponse};
pub use server::*;
