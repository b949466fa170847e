//! Bridging of asynchronous failure into [`Outcome`].
//!
//! A future is *rejected* when it panics, or, for [`from_fallible_future`], when it settles to an error. Rejection
//! reasons that are error-kind values are kept as is; anything else (`panic!("...")` messages, `panic_any(2)`, ...)
//! is wrapped in an [`UnknownFailureError`] that keeps the original reason. The bridge itself never panics: every
//! outcome is returned as a value.
//!
//! No timeout or cancellation is imposed here; dropping the returned future drops the wrapped one.

use std::error::Error as StdError;
use std::future::IntoFuture;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::error::{EmptyValueError, Error, ErrorKind, MessageError, PanicPayload, UnknownFailureError};
use crate::outcome::Outcome;

/// A settled value that is either a success or a failure.
pub trait Settlement {
  type Value;

  fn into_outcome(self) -> Outcome<Self::Value, Error>;
}
impl<T, E: ErrorKind> Settlement for Outcome<T, E> {
  type Value = T;

  #[inline]
  fn into_outcome(self) -> Outcome<T, Error> { self.into_dyn() }
}
impl<T, E: ErrorKind> Settlement for Result<T, E> {
  type Value = T;

  #[inline]
  fn into_outcome(self) -> Outcome<T, Error> { Outcome::from(self).into_dyn() }
}


/// Awaits `future`, resolving to a success with its output, or to a failure if it panics.
///
/// A panic with a caller-defined error type `E` as payload, such as the one raised by [`Outcome::unwrap`] on an
/// `Outcome<_, E>`, becomes an [`UnknownFailureError`] here. Use `from_future_with(future, classify_as::<E>())`
/// (see [`from_future_with`] and [`classify_as`]) to keep it as `E`.
pub async fn from_future<F: IntoFuture>(future: F) -> Outcome<F::Output, Error> {
  from_future_with(future, |payload| Err(payload)).await
}

/// Awaits `future` and flattens its settled [`Settlement`] into an `Outcome`; panics are failures as well.
///
/// This is what flattens an `Outcome` whose success value is a future (e.g. produced by
/// [`map_ok`](Outcome::map_ok) with an async closure) into a single `Outcome`.
pub async fn from_fallible_future<F>(future: F) -> Outcome<<F::Output as Settlement>::Value, Error> where
  F: IntoFuture,
  F::Output: Settlement,
{
  from_future(future).await.and_then(Settlement::into_outcome)
}

/// Like [`from_future`], but first offers panic payloads to `classify`, which returns the error-kind value the
/// payload represents, or gives the payload back if it does not recognize it.
///
/// Use this when futures panic with error types that the bridge cannot recognize on its own; see
/// [`classify_as`] for the common case.
pub async fn from_future_with<F: IntoFuture>(
  future: F,
  classify: impl FnOnce(PanicPayload) -> Result<Error, PanicPayload>,
) -> Outcome<F::Output, Error> {
  // `into_future` may panic too, so it runs inside the guarded future.
  match AssertUnwindSafe(async move { future.into_future().await }).catch_unwind().await {
    Ok(value) => {
      tracing::trace!("future settled with a value");
      Outcome::Success(value)
    }
    Err(payload) => {
      let error = classify(payload).unwrap_or_else(classify_payload);
      tracing::trace!(%error, "future was rejected");
      Outcome::Failure(error)
    }
  }
}

/// Returns a classifier for [`from_future_with`] that recognizes panic payloads of type `E`.
pub fn classify_as<E: ErrorKind>() -> impl FnOnce(PanicPayload) -> Result<Error, PanicPayload> {
  |payload: PanicPayload| payload.downcast::<E>().map(|error| Error::new(*error))
}

/// Turns a panic payload into an error-kind value.
///
/// Payloads that are errors of this crate (including the ones raised by `unwrap`-style accessors) or boxed
/// errors are kept; anything else is wrapped in an [`UnknownFailureError`].
pub fn classify_payload(payload: PanicPayload) -> Error {
  macro_rules! try_downcast {
    ($payload:ident, $($ty:ty),*) => {
      $(let $payload = match $payload.downcast::<$ty>() {
        Ok(error) => return Error::from(*error),
        Err(payload) => payload,
      };)*
    };
  }
  let payload = match payload.downcast::<Error>() {
    Ok(error) => return *error,
    Err(payload) => payload,
  };
  try_downcast!(payload, EmptyValueError, MessageError, UnknownFailureError, Box<dyn StdError + Send + Sync>);
  let error = UnknownFailureError::new(payload);
  tracing::debug!(reason = error.description(), "rejection reason is not an error; wrapping it in UnknownFailureError");
  Error::new(error)
}


#[cfg(test)]
mod tests {
  use thiserror::Error;

  use super::*;
  use crate::maybe::some;
  use crate::outcome::err;

  #[derive(Debug, Error)]
  #[error("custom error")]
  struct CustomError;

  #[tokio::test]
  async fn resolved_future_is_success() {
    let outcome = from_future(async { 3 }).await;
    assert!(outcome.is_ok());
    assert_eq!(outcome.unwrap(), 3);
  }

  #[tokio::test]
  async fn rejected_with_error_is_failure() {
    let outcome = from_fallible_future(async { Err::<i32, _>(CustomError) }).await;
    assert!(outcome.err().unwrap().is::<CustomError>());
  }

  #[tokio::test]
  async fn panic_with_error_payload_keeps_error() {
    let outcome = from_future(async { err::<i32, Error>(Error::new(CustomError)).unwrap() }).await;
    assert!(outcome.err().unwrap().is::<CustomError>());

    let outcome = from_future(async { std::panic::panic_any(EmptyValueError::new()) }).await;
    assert!(outcome.err().unwrap().is::<EmptyValueError>());
  }

  #[tokio::test]
  async fn panic_with_non_error_payload_is_unknown_failure() {
    let outcome = from_future(async { std::panic::panic_any(2) }).await;
    let error = outcome.err().unwrap().downcast::<UnknownFailureError>().unwrap();
    assert_eq!(error.reason_cloned::<i32>(), Some(2));

    let outcome = from_future(async { panic!("plain message") }).await;
    let error = outcome.err().unwrap();
    assert!(error.is::<UnknownFailureError>());
    assert_eq!(error.to_string(), "Unknown failure: plain message");
  }

  #[tokio::test]
  async fn classifier_recognizes_custom_payload() {
    let outcome = from_future_with(async { std::panic::panic_any(CustomError) }, classify_as::<CustomError>()).await;
    assert!(outcome.err().unwrap().is::<CustomError>());

    let outcome = from_future_with(async { std::panic::panic_any(CustomError) }, |payload| Err(payload)).await;
    assert!(outcome.err().unwrap().is::<UnknownFailureError>());
  }

  #[tokio::test]
  async fn flattens_outcome_of_future() {
    let outcome = from_fallible_future(some(123).ok_or::<Error>("No value").map_ok(|n| async move { n + 1 })).await;
    assert!(outcome.is_ok());
    assert_eq!(outcome.unwrap(), 124);

    let outcome = from_fallible_future(err::<std::future::Ready<i32>, Error>("No value")).await;
    assert_eq!(outcome.err().unwrap().to_string(), "No value");

    let outcome = from_fallible_future(async { err::<i32, MessageError>("inner") }).await;
    assert!(outcome.err().unwrap().is::<MessageError>());
  }

  struct PanicsOnConversion;
  impl IntoFuture for PanicsOnConversion {
    type Output = i32;
    type IntoFuture = std::future::Ready<i32>;

    fn into_future(self) -> Self::IntoFuture { panic!("conversion failed") }
  }

  #[tokio::test]
  async fn panic_while_converting_into_future_is_failure() {
    let outcome = from_future(PanicsOnConversion).await;
    assert!(outcome.is_error());
    assert_eq!(outcome.err().unwrap().to_string(), "Unknown failure: conversion failed");
  }

  #[tokio::test]
  async fn typed_unwrap_needs_classifier() {
    let outcome = from_future(async { err::<i32, CustomError>(CustomError).unwrap() }).await;
    assert!(outcome.err().unwrap().is::<UnknownFailureError>());

    let outcome = from_future_with(async { err::<i32, CustomError>(CustomError).unwrap() }, classify_as::<CustomError>()).await;
    assert!(outcome.err().unwrap().is::<CustomError>());
  }

  #[test]
  fn classify_payload_keeps_boxed_errors() {
    let boxed: Box<dyn StdError + Send + Sync> = Box::new(CustomError);
    let error = classify_payload(Box::new(boxed));
    assert!(error.is::<CustomError>());
  }
}
