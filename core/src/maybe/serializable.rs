//! Behavior-free projection of a [`Maybe`], for crossing boundaries that only carry plain data.
//!
//! Wire format: `{"_marker": 0, "value": v}` for a present value, `{"_marker": 1}` for an absent one. The `value`
//! field is left out entirely (not `null`) when absent.

use serde::de::{DeserializeOwned, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Maybe;

/// Variant tag of a [`SerializableMaybe`].
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
pub enum Marker {
  Some = 0,
  None = 1,
}
impl Serialize for Marker {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(*self as u8)
  }
}
impl<'de> Deserialize<'de> for Marker {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    match u64::deserialize(deserializer)? {
      0 => Ok(Marker::Some),
      1 => Ok(Marker::None),
      other => Err(serde::de::Error::invalid_value(Unexpected::Unsigned(other), &"marker 0 or 1")),
    }
  }
}

/// Plain-data form of a [`Maybe`]: the tag, and the value if present.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct SerializableMaybe<T> {
  #[serde(rename = "_marker")]
  pub marker: Marker,
  #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_present")]
  pub value: Option<T>,
}

// A present `value` field is always `Some`, even when it holds `null`, so `Maybe<Option<_>>` and `Maybe<()>` survive.
fn deserialize_present<'de, D: Deserializer<'de>, T: Deserialize<'de>>(deserializer: D) -> Result<Option<T>, D::Error> {
  T::deserialize(deserializer).map(Some)
}

impl<T> SerializableMaybe<T> {
  #[inline]
  pub fn some(value: T) -> Self { Self { marker: Marker::Some, value: Some(value) } }

  #[inline]
  pub fn none() -> Self { Self { marker: Marker::None, value: None } }
}

impl<T> Maybe<T> {
  /// Converts into the plain-data projection.
  #[inline]
  pub fn into_serializable(self) -> SerializableMaybe<T> {
    match self {
      Maybe::Some(value) => SerializableMaybe::some(value),
      Maybe::None => SerializableMaybe::none(),
    }
  }

  /// Borrows into the plain-data projection.
  #[inline]
  pub fn to_serializable(&self) -> SerializableMaybe<&T> { self.as_ref().into_serializable() }
}

impl<T> From<Maybe<T>> for SerializableMaybe<T> {
  #[inline]
  fn from(maybe: Maybe<T>) -> Self { maybe.into_serializable() }
}
impl<T> From<SerializableMaybe<T>> for Maybe<T> {
  #[inline]
  fn from(serializable: SerializableMaybe<T>) -> Self { from_serializable_maybe(serializable) }
}

/// Converts a projection back into a [`Maybe`]. A projection tagged present but without a value is `None`.
pub fn from_serializable_maybe<T>(serializable: SerializableMaybe<T>) -> Maybe<T> {
  match serializable {
    SerializableMaybe { marker: Marker::Some, value: Some(value) } => Maybe::Some(value),
    SerializableMaybe { marker: Marker::Some, value: None } => {
      tracing::debug!("serialized Maybe is tagged present but has no value; returning None");
      Maybe::None
    }
    SerializableMaybe { marker: Marker::None, .. } => Maybe::None,
  }
}

/// Parses an arbitrary JSON value as a serialized [`Maybe`].
///
/// Permissive: an absent value, or anything that is not a well-formed projection of a `Maybe<T>` (a number,
/// a string, an array, `{}`, a value of the wrong type, ...), results in `None` instead of an error.
pub fn from_serializable_value<T: DeserializeOwned>(value: Option<&serde_json::Value>) -> Maybe<T> {
  let Some(value) = value else {
    return Maybe::None;
  };
  match SerializableMaybe::<T>::deserialize(value) {
    Ok(serializable) => from_serializable_maybe(serializable),
    Err(cause) => {
      tracing::debug!(%cause, "value is not a serialized Maybe; returning None");
      Maybe::None
    }
  }
}

impl<T: Serialize> Serialize for Maybe<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.to_serializable().serialize(serializer)
  }
}
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    SerializableMaybe::deserialize(deserializer).map(from_serializable_maybe)
  }
}
