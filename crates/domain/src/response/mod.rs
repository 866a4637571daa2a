//! HTTP Response domain types

mod failure;
mod spec;

pub use failure::{Exchange, TransportFailure, TransportFailureKind};
pub use spec::{CapturedResponse, StatusCode};
