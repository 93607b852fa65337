//! Per-operation output structs.
//!
//! Every output is a pure function of the HTTP response it was built from
//! (status, headers, body) plus the request context; construction lives in
//! `selstack-http`.

mod container;
mod object;

pub use container::*;
pub use object::*;
