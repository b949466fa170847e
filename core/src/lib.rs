//! Two closed, immutable containers that make absence and failure explicit: [`Maybe`] (a value, or nothing) and
//! [`Outcome`] (a value, or an error), plus a bridge that turns a future's settlement into an [`Outcome`].
//!
//! Features:
//! - `serde`: the plain-data projection of [`Maybe`] and serde impls for it.
//! - `future`: the future bridge in [`future`], and `IntoFuture` for containers holding a future.

pub mod error;
pub mod maybe;
pub mod outcome;

#[cfg(feature = "future")]
pub mod future;

pub use error::{EmptyValueError, Error, ErrorKind, MessageError, UnknownFailureError};
pub use maybe::{none, some, unknown, Maybe};
pub use outcome::{err, ok, Outcome};
