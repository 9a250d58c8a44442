//! Common utilities for the wren layout engine.
//!
//! This crate provides the shared infrastructure used by the other crates:
//! - **Warning channel** — deduplicated colored stderr reporting for
//!   degraded-but-tolerated inputs
//! - **HTTP fetch** — blocking GET with redirects left to the caller
//! - **URL resolution** — `Location` header resolution against a base URL

pub mod net;
pub mod url;
pub mod warning;
