//! Print-shop quote engine library crate.
//!
//! This crate exposes the pricing engine (a pure function from job
//! parameters and a rate-config snapshot to an itemized cost
//! breakdown) together with the JSON config store and the HTTP API
//! that surface it.  External applications may depend on the
//! `quote_engine` crate and call `engine::calculate` directly or embed
//! the API via `api::build_router`.

pub mod api;
pub mod engine;
pub mod error;
pub mod formulas;
pub mod geometry;
pub mod models;
pub mod profile;
pub mod rates;
pub mod store;
