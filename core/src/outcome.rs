use std::panic::panic_any;

use crate::error::{Error, ErrorKind};
use crate::maybe::Maybe;

/// A value of type `T`, or an error of type `E`.
///
/// Immutable once constructed; every transformation produces a new `Outcome`.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[must_use]
pub enum Outcome<T, E = Error> {
  Success(T),
  Failure(E),
}

/// Creates a successful `Outcome` holding `value`.
#[inline]
pub fn ok<T, E>(value: T) -> Outcome<T, E> { Outcome::Success(value) }

/// Creates a failed `Outcome`. `error` is stored as is, or, when `E` allows it (such as [`Error`]), built from a
/// plain message.
#[inline]
pub fn err<T, E>(error: impl Into<E>) -> Outcome<T, E> { Outcome::Failure(error.into()) }

impl<T, E> Outcome<T, E> {
  #[inline]
  pub fn is_ok(&self) -> bool { matches!(self, Self::Success(_)) }

  #[inline]
  pub fn is_error(&self) -> bool { matches!(self, Self::Failure(_)) }

  #[inline]
  pub fn as_ref(&self) -> Outcome<&T, &E> {
    match self {
      Self::Success(value) => Outcome::Success(value),
      Self::Failure(error) => Outcome::Failure(error),
    }
  }

  /// Returns the success value, or `default` on failure.
  #[inline]
  pub fn unwrap_or(self, default: T) -> T {
    match self {
      Self::Success(value) => value,
      Self::Failure(_) => default,
    }
  }

  /// Returns the success value, or `error` (not the stored error) on failure.
  #[inline]
  pub fn try_unwrap_or_raise<EE>(self, error: EE) -> Result<T, EE> {
    match self {
      Self::Success(value) => Ok(value),
      Self::Failure(_) => Err(error),
    }
  }

  /// Projects the success half, dropping the error.
  #[inline]
  pub fn ok(self) -> Maybe<T> {
    match self {
      Self::Success(value) => Maybe::Some(value),
      Self::Failure(_) => Maybe::None,
    }
  }

  /// Projects the failure half, dropping the value.
  #[inline]
  pub fn err(self) -> Maybe<E> {
    match self {
      Self::Success(_) => Maybe::None,
      Self::Failure(error) => Maybe::Some(error),
    }
  }

  /// Maps the success value with `f`, leaving a failure untouched.
  ///
  /// `f` may return a future; the resulting `Outcome` can then be awaited (see the [`IntoFuture`] impl) or passed
  /// to the [future bridge](crate::future) to get a single flattened `Outcome`.
  ///
  /// [`IntoFuture`]: std::future::IntoFuture
  #[inline]
  pub fn map_ok<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
    match self {
      Self::Success(value) => Outcome::Success(f(value)),
      Self::Failure(error) => Outcome::Failure(error),
    }
  }

  /// Maps the error with `f`, leaving a success untouched.
  #[inline]
  pub fn map_err<EE>(self, f: impl FnOnce(E) -> EE) -> Outcome<T, EE> {
    match self {
      Self::Success(value) => Outcome::Success(value),
      Self::Failure(error) => Outcome::Failure(f(error)),
    }
  }

  #[inline]
  pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U, E>) -> Outcome<U, E> {
    match self {
      Self::Success(value) => f(value),
      Self::Failure(error) => Outcome::Failure(error),
    }
  }

  #[inline]
  pub fn into_result(self) -> Result<T, E> { self.into() }
}

impl<T, E: ErrorKind> Outcome<T, E> {
  /// Returns the success value.
  ///
  /// # Panics
  ///
  /// Panics on failure, with the stored error itself as the payload. Inside a future passed to the
  /// [future bridge](crate::future), such a payload of a caller-defined `E` is recognized with
  /// `from_future_with(future, classify_as::<E>())`.
  #[inline]
  #[track_caller]
  pub fn unwrap(self) -> T {
    match self {
      Self::Success(value) => value,
      Self::Failure(error) => panic_any(error),
    }
  }

  /// Returns the success value.
  ///
  /// # Panics
  ///
  /// Panics on failure, with `error` as the payload instead of the stored error.
  #[inline]
  #[track_caller]
  pub fn unwrap_or_raise<EE: ErrorKind>(self, error: EE) -> T {
    match self.try_unwrap_or_raise(error) {
      Ok(value) => value,
      Err(error) => panic_any(error),
    }
  }

  /// Erases the error type into an [`Error`].
  #[inline]
  pub fn into_dyn(self) -> Outcome<T, Error> { self.map_err(Error::new) }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
  #[inline]
  fn from(result: Result<T, E>) -> Self {
    match result {
      Ok(value) => Self::Success(value),
      Err(error) => Self::Failure(error),
    }
  }
}
impl<T, E> From<Outcome<T, E>> for Result<T, E> {
  #[inline]
  fn from(outcome: Outcome<T, E>) -> Self {
    match outcome {
      Outcome::Success(value) => Ok(value),
      Outcome::Failure(error) => Err(error),
    }
  }
}

#[cfg(feature = "future")]
impl<F: std::future::Future, E> std::future::IntoFuture for Outcome<F, E> {
  type Output = Outcome<F::Output, E>;
  type IntoFuture = futures::future::Either<
    futures::future::Map<F, fn(F::Output) -> Outcome<F::Output, E>>,
    futures::future::Ready<Outcome<F::Output, E>>,
  >;

  /// Awaits the success future; a failure is ready immediately.
  fn into_future(self) -> Self::IntoFuture {
    use futures::FutureExt;
    match self {
      Self::Success(future) => futures::future::Either::Left(future.map(Outcome::Success as fn(F::Output) -> Outcome<F::Output, E>)),
      Self::Failure(error) => futures::future::Either::Right(futures::future::ready(Outcome::Failure(error))),
    }
  }
}


#[cfg(test)]
mod tests {
  use std::panic::{catch_unwind, AssertUnwindSafe};

  use thiserror::Error;

  use super::*;
  use crate::error::{EmptyValueError, MessageError};

  #[derive(Clone, Eq, PartialEq, Debug, Error)]
  #[error("new error class")]
  struct NewErrorClass;

  #[derive(Clone, Eq, PartialEq, Debug, Error)]
  #[error("mapped: {0}")]
  struct MappedError(String);

  fn panic_payload<P: 'static, R>(f: impl FnOnce() -> R) -> P {
    let payload = catch_unwind(AssertUnwindSafe(f)).err().expect("expected a panic");
    *payload.downcast::<P>().ok().expect("unexpected panic payload type")
  }

  #[test]
  fn unwrap_success() {
    assert_eq!(ok::<_, Error>(1).unwrap(), 1);
  }

  #[test]
  fn unwrap_failure_raises_stored_error() {
    let error: NewErrorClass = panic_payload(|| err::<i32, NewErrorClass>(NewErrorClass).unwrap());
    assert_eq!(error, NewErrorClass);
  }

  #[test]
  fn discriminators() {
    assert!(ok::<_, Error>(3).is_ok());
    assert!(!ok::<_, Error>(3).is_error());
    assert!(err::<i32, Error>("failed").is_error());
    assert!(!err::<i32, Error>("failed").is_ok());
  }

  #[test]
  fn unwrap_or() {
    assert_eq!(err::<i32, Error>("failed").unwrap_or(2), 2);
    assert_eq!(ok::<_, Error>(2).unwrap_or(5), 2);
  }

  #[test]
  fn unwrap_or_raise_raises_supplied_error() {
    let error: NewErrorClass = panic_payload(|| err::<i32, Error>("failed").unwrap_or_raise(NewErrorClass));
    assert_eq!(error, NewErrorClass);
    assert_eq!(ok::<_, Error>(3).unwrap_or_raise(NewErrorClass), 3);
    assert_eq!(err::<i32, Error>("failed").try_unwrap_or_raise(NewErrorClass), Err(NewErrorClass));
  }

  #[test]
  fn ok_and_err_views() {
    assert!(ok::<_, Error>(3).ok().is_some());
    assert!(err::<i32, Error>("failed").ok().is_none());
    assert!(ok::<_, Error>(2).err().is_none());
    assert!(err::<i32, Error>("failed").err().is_some());
  }

  #[test]
  fn map_ok() {
    assert_eq!(ok::<_, Error>(2).map_ok(|x| x.to_string()).unwrap(), "2");
    let outcome = err::<i32, NewErrorClass>(NewErrorClass).map_ok(|x| x * 2);
    assert_eq!(outcome, Outcome::Failure(NewErrorClass));
  }

  #[test]
  fn map_err() {
    let outcome = err::<i32, MessageError>("boom").map_err(|e| MappedError(e.0));
    assert_eq!(outcome, Outcome::Failure(MappedError("boom".to_string())));
    let outcome = ok::<_, MessageError>(2).map_err(|e| MappedError(e.0));
    assert_eq!(outcome, Outcome::Success(2));
  }

  #[test]
  fn and_then_chains() {
    let halve = |x: i32| if x % 2 == 0 { ok(x / 2) } else { err::<i32, MessageError>("odd") };
    assert_eq!(ok(8).and_then(halve).and_then(halve), ok(2));
    assert_eq!(ok(6).and_then(halve).and_then(halve), err("odd"));
  }

  #[test]
  fn err_from_message_is_generic_error() {
    let error: Error = panic_payload(|| err::<i32, Error>("This is an error").unwrap());
    assert!(error.is::<MessageError>());
    assert_eq!(error.to_string(), "This is an error");
  }

  #[test]
  fn err_with_default_generic_error() {
    let error: MessageError = panic_payload(|| err::<i32, MessageError>(MessageError::default()).unwrap());
    assert_eq!(error.message(), "");
  }

  #[test]
  fn into_dyn_keeps_error() {
    let outcome = err::<i32, EmptyValueError>(EmptyValueError::new()).into_dyn();
    assert!(outcome.err().unwrap().is::<EmptyValueError>());
  }

  #[test]
  fn result_conversions() {
    assert_eq!(Outcome::from(Ok::<i32, MessageError>(1)), ok(1));
    assert_eq!(ok::<i32, MessageError>(1).into_result(), Ok(1));
    assert_eq!(err::<i32, MessageError>("x").into_result(), Err(MessageError::new("x")));
  }

  #[cfg(feature = "future")]
  #[tokio::test]
  async fn awaiting_an_outcome_future() {
    assert_eq!(ok::<_, MessageError>(async { 1 }).await, ok(1));
    let failed = err::<std::future::Ready<i32>, MessageError>("x").await;
    assert_eq!(failed, err("x"));
  }
}
