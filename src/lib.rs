#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts
)]

//! Data model for one HTTP request/response exchange.
//!
//! An immutable [`Request`] view of an already-parsed inbound request, and a
//! mutable [`Response`] built up by handler code and then serialized exactly
//! once against a [`Responder`] bound to the live connection.

pub mod headers;
pub mod mime;
pub mod parse;
pub mod request;
pub mod response;
pub mod wire;

pub use headers::HeaderMap;
pub use request::{Method, Methods, Query, Request};
pub use response::{Response, StatusCode};
pub use wire::{Responder, WireWriter};

pub type AnyResult<T> = eyre::Result<T>;
