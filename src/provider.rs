//! Provider-facing lookup tables (error codes and domain groups).
//!
//! `code` maps the provider's error tokens onto [`ErrorKind`](crate::error::ErrorKind) and
//! human-readable messages, while `domain` names the domain groups accepted when ordering
//! an address.

pub mod code;
pub mod domain;

pub use code::*;
pub use domain::*;
