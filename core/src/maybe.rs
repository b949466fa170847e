use std::panic::panic_any;

use crate::error::EmptyValueError;
use crate::outcome::Outcome;

#[cfg(feature = "serde")]
mod serializable;
#[cfg(feature = "serde")]
pub use serializable::{from_serializable_maybe, from_serializable_value, Marker, SerializableMaybe};

/// A value of type `T`, or nothing.
///
/// Immutable once constructed; every transformation produces a new `Maybe`. Two `Maybe`s with the same variant
/// and value behave the same for every operation. Ordered like `Option`: `None` before any `Some`.
#[derive(Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[must_use]
pub enum Maybe<T> {
  #[default]
  None,
  Some(T),
}

/// Creates a `Maybe` holding `value`. Any value is accepted as present, including `0`, `""`, and `false`.
#[inline]
pub fn some<T>(value: T) -> Maybe<T> { Maybe::Some(value) }

/// Creates an empty `Maybe`.
#[inline]
pub fn none<T>() -> Maybe<T> { Maybe::None }

/// Lifts a possibly absent host value into a `Maybe`: `None` when absent, `Some` otherwise.
#[inline]
pub fn unknown<T>(value: impl Into<Option<T>>) -> Maybe<T> {
  match value.into() {
    Some(value) => Maybe::Some(value),
    None => Maybe::None,
  }
}

impl<T> Maybe<T> {
  #[inline]
  pub fn is_some(&self) -> bool { matches!(self, Self::Some(_)) }

  #[inline]
  pub fn is_none(&self) -> bool { matches!(self, Self::None) }

  #[inline]
  pub fn as_ref(&self) -> Maybe<&T> {
    match self {
      Self::Some(value) => Maybe::Some(value),
      Self::None => Maybe::None,
    }
  }


  /// Returns the contained value.
  ///
  /// # Panics
  ///
  /// Panics with an [`EmptyValueError`] payload if this is `None`.
  #[inline]
  #[track_caller]
  pub fn unwrap(self) -> T {
    match self.try_unwrap() {
      Ok(value) => value,
      Err(error) => panic_any(error),
    }
  }

  /// Returns the contained value, or an [`EmptyValueError`] if this is `None`.
  #[inline]
  pub fn try_unwrap(self) -> Result<T, EmptyValueError> {
    match self {
      Self::Some(value) => Ok(value),
      Self::None => Err(EmptyValueError::new()),
    }
  }

  /// Returns the contained value, or `default` if this is `None`.
  ///
  /// # Panics
  ///
  /// Panics with an [`EmptyValueError`] payload if this is `None` and `default` is absent. Absence is never
  /// propagated silently through a default; use [`unwrap_nullable_or`](Self::unwrap_nullable_or) for that.
  #[inline]
  #[track_caller]
  pub fn unwrap_or(self, default: impl Into<Option<T>>) -> T {
    match self.try_unwrap_or(default) {
      Ok(value) => value,
      Err(error) => panic_any(error),
    }
  }

  /// Returns the contained value, `default` if this is `None`, or an [`EmptyValueError`] if `default` is absent
  /// as well.
  pub fn try_unwrap_or(self, default: impl Into<Option<T>>) -> Result<T, EmptyValueError> {
    match self {
      Self::Some(value) => Ok(value),
      Self::None => default.into().ok_or_else(EmptyValueError::absent_default),
    }
  }

  /// Returns the contained value as a host value, absent if this is `None`. Never panics.
  #[inline]
  pub fn unwrap_nullable(self) -> Option<T> { self.into() }

  /// Returns the contained value, or `default` verbatim (absent or not) if this is `None`. Never panics.
  #[inline]
  pub fn unwrap_nullable_or(self, default: impl Into<Option<T>>) -> Option<T> {
    match self {
      Self::Some(value) => Some(value),
      Self::None => default.into(),
    }
  }

  /// Like [`unwrap`](Self::unwrap), but the [`EmptyValueError`] carries `message`.
  ///
  /// # Panics
  ///
  /// Panics with an [`EmptyValueError`] payload if this is `None`.
  #[inline]
  #[track_caller]
  pub fn expect(self, message: &str) -> T {
    match self {
      Self::Some(value) => value,
      Self::None => panic_any(EmptyValueError::with_message(message.to_string())),
    }
  }


  /// Maps the contained value with `f`. Panics in `f` are not caught.
  #[inline]
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
    match self {
      Self::Some(value) => Maybe::Some(f(value)),
      Self::None => Maybe::None,
    }
  }

  /// Chains `f`, which produces a `Maybe` itself. `f` is not called if this is `None`.
  #[inline]
  pub fn and_then<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
    match self {
      Self::Some(value) => f(value),
      Self::None => Maybe::None,
    }
  }

  /// Converts into an [`Outcome`], failing with `error` if this is `None`.
  ///
  /// `error` may be a structured error or, when `E` allows it (such as [`Error`](crate::error::Error)), a plain
  /// message.
  #[inline]
  pub fn ok_or<E>(self, error: impl Into<E>) -> Outcome<T, E> {
    match self {
      Self::Some(value) => Outcome::Success(value),
      Self::None => Outcome::Failure(error.into()),
    }
  }
}

impl<T> From<Option<T>> for Maybe<T> {
  #[inline]
  fn from(value: Option<T>) -> Self { unknown(value) }
}
impl<T> From<Maybe<T>> for Option<T> {
  #[inline]
  fn from(maybe: Maybe<T>) -> Self {
    match maybe {
      Maybe::Some(value) => Some(value),
      Maybe::None => None,
    }
  }
}

#[cfg(feature = "future")]
impl<F: std::future::Future> std::future::IntoFuture for Maybe<F> {
  type Output = Maybe<F::Output>;
  type IntoFuture = futures::future::Either<
    futures::future::Map<F, fn(F::Output) -> Maybe<F::Output>>,
    futures::future::Ready<Maybe<F::Output>>,
  >;

  /// Awaits the contained future, if any.
  fn into_future(self) -> Self::IntoFuture {
    use futures::FutureExt;
    match self {
      Self::Some(future) => futures::future::Either::Left(future.map(Maybe::Some as fn(F::Output) -> Maybe<F::Output>)),
      Self::None => futures::future::Either::Right(futures::future::ready(Maybe::None)),
    }
  }
}
