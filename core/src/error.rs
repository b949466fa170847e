use std::any::Any;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Error-kind capability: anything usable as the error half of an [`Outcome`](crate::outcome::Outcome).
///
/// Implemented for every thread-safe `'static` [`std::error::Error`].
pub trait ErrorKind: StdError + Send + Sync + 'static {}

impl<E: StdError + Send + Sync + 'static> ErrorKind for E {}

/// Payload of a panic, as produced by [`std::panic::catch_unwind`].
pub type PanicPayload = Box<dyn Any + Send + 'static>;


/// A value was demanded from an empty [`Maybe`](crate::maybe::Maybe).
#[derive(Clone, Eq, PartialEq, Hash, Debug, Error)]
#[error("{message}")]
pub struct EmptyValueError {
  message: Cow<'static, str>,
}
impl EmptyValueError {
  pub(crate) const DEFAULT_MESSAGE: &'static str = "The Maybe provided was unwrapped with an empty value";
  pub(crate) const ABSENT_DEFAULT_MESSAGE: &'static str = "The provided default value was absent";

  #[inline]
  pub fn new() -> Self { Self { message: Cow::Borrowed(Self::DEFAULT_MESSAGE) } }

  #[inline]
  pub fn with_message(message: impl Into<Cow<'static, str>>) -> Self {
    Self { message: message.into() }
  }

  #[inline]
  pub(crate) fn absent_default() -> Self { Self::with_message(Self::ABSENT_DEFAULT_MESSAGE) }

  #[inline]
  pub fn message(&self) -> &str { &self.message }
}
impl Default for EmptyValueError {
  #[inline]
  fn default() -> Self { Self::new() }
}


/// Generic error carrying only a message; what plain strings turn into when used as an error.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug, Error)]
#[error("{0}")]
pub struct MessageError(pub String);
impl MessageError {
  #[inline]
  pub fn new(message: impl Into<String>) -> Self { Self(message.into()) }

  #[inline]
  pub fn message(&self) -> &str { &self.0 }
}


/// A future was rejected with a reason that is not an error-kind value.
///
/// The original reason is kept and can be inspected by type with [`reason_is`](Self::reason_is) and
/// [`reason_cloned`](Self::reason_cloned), or taken back with [`into_reason`](Self::into_reason).
#[derive(Error)]
#[error("Unknown failure: {description}")]
pub struct UnknownFailureError {
  // Panic payloads are `Send` but not `Sync`; the lock makes this error shareable.
  reason: Mutex<PanicPayload>,
  description: String,
}
impl UnknownFailureError {
  pub fn new(reason: PanicPayload) -> Self {
    let description = describe_reason(reason.as_ref());
    Self { reason: Mutex::new(reason), description }
  }

  /// Creates an unknown failure from any value, as if a future was rejected with `reason`.
  #[inline]
  pub fn from_reason<R: Any + Send>(reason: R) -> Self { Self::new(Box::new(reason)) }

  /// Best-effort human readable form of the reason.
  #[inline]
  pub fn description(&self) -> &str { &self.description }

  pub fn reason_is<R: Any>(&self) -> bool {
    self.reason.lock().unwrap_or_else(PoisonError::into_inner).is::<R>()
  }

  pub fn reason_cloned<R: Any + Clone>(&self) -> Option<R> {
    self.reason.lock().unwrap_or_else(PoisonError::into_inner).downcast_ref::<R>().cloned()
  }

  pub fn into_reason(self) -> PanicPayload {
    self.reason.into_inner().unwrap_or_else(PoisonError::into_inner)
  }
}
impl Debug for UnknownFailureError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("UnknownFailureError")
      .field("description", &self.description)
      .finish_non_exhaustive()
  }
}

fn describe_reason(reason: &(dyn Any + Send)) -> String {
  macro_rules! describe {
    ($($ty:ty),*) => {
      $(if let Some(value) = reason.downcast_ref::<$ty>() { return value.to_string(); })*
    };
  }
  describe!(&'static str, String, Cow<'static, str>, bool, char);
  describe!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
  "<opaque reason>".to_string()
}


/// Type-erased error-kind value; the default error of an [`Outcome`](crate::outcome::Outcome).
///
/// Plain messages convert into an `Error` wrapping a [`MessageError`]; structured errors are wrapped with
/// [`Error::new`] and can be recovered with [`downcast`](Self::downcast) and friends.
pub struct Error {
  inner: Box<dyn StdError + Send + Sync + 'static>,
}
impl Error {
  /// Wraps `error`. Wrapping an `Error` returns it as is instead of nesting it.
  pub fn new<E: ErrorKind>(error: E) -> Self {
    let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(error);
    Self::from_boxed(boxed)
  }

  pub fn from_boxed(boxed: Box<dyn StdError + Send + Sync + 'static>) -> Self {
    match boxed.downcast::<Error>() {
      Ok(error) => *error,
      Err(inner) => Self { inner },
    }
  }

  #[inline]
  pub fn msg(message: impl Into<String>) -> Self { Self::new(MessageError::new(message)) }

  #[inline]
  pub fn is<E: ErrorKind>(&self) -> bool { self.inner.is::<E>() }

  #[inline]
  pub fn downcast_ref<E: ErrorKind>(&self) -> Option<&E> { self.inner.downcast_ref::<E>() }

  /// Takes the wrapped error back as `E`, or returns `self` unchanged if it is some other error.
  pub fn downcast<E: ErrorKind>(self) -> Result<E, Self> {
    self.inner.downcast::<E>()
      .map(|error| *error)
      .map_err(|inner| Self { inner })
  }

  #[inline]
  pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> { self.inner }
}
impl Debug for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { Debug::fmt(&self.inner, f) }
}
impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(&self.inner, f) }
}
impl StdError for Error {
  fn source(&self) -> Option<&(dyn StdError + 'static)> { self.inner.source() }
}

impl From<&str> for Error {
  #[inline]
  fn from(message: &str) -> Self { Self::msg(message) }
}
impl From<String> for Error {
  #[inline]
  fn from(message: String) -> Self { Self::msg(message) }
}
impl From<Cow<'_, str>> for Error {
  #[inline]
  fn from(message: Cow<'_, str>) -> Self { Self::msg(message.into_owned()) }
}
impl From<MessageError> for Error {
  #[inline]
  fn from(error: MessageError) -> Self { Self::new(error) }
}
impl From<EmptyValueError> for Error {
  #[inline]
  fn from(error: EmptyValueError) -> Self { Self::new(error) }
}
impl From<UnknownFailureError> for Error {
  #[inline]
  fn from(error: UnknownFailureError) -> Self { Self::new(error) }
}
impl From<Box<dyn StdError + Send + Sync + 'static>> for Error {
  #[inline]
  fn from(boxed: Box<dyn StdError + Send + Sync + 'static>) -> Self { Self::from_boxed(boxed) }
}

impl From<&str> for MessageError {
  #[inline]
  fn from(message: &str) -> Self { Self::new(message) }
}
impl From<String> for MessageError {
  #[inline]
  fn from(message: String) -> Self { Self(message) }
}
