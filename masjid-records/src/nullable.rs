//! Patch fields that can clear a value.
//!
//! A clearable field is an `Option<Option<T>>`:
//! - `None` leaves the stored value alone and is omitted from the body
//! - `Some(None)` clears it and is sent as JSON `null`
//! - `Some(Some(v))` replaces it
//!
//! Serializing needs nothing special beyond `skip_serializing_if`. Reading
//! back needs [`deserialize`] so that an explicit `null` stays `Some(None)`
//! instead of collapsing into "leave alone".

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
