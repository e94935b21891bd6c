//! Contact model types.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for a contact.
///
/// Allocated from the creation time in milliseconds since the Unix epoch.
/// Serialized as a bare JSON number; integral floats such as `1.7e12` are
/// accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ContactIdVisitor)
    }
}

struct ContactIdVisitor;

impl Visitor<'_> for ContactIdVisitor {
    type Value = ContactId;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("an integral contact id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ContactId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(ContactId)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // 2^63 is exactly representable; anything below it fits in an i64.
        if v.trunc() == v && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(ContactId(v as i64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

impl ContactId {
    /// Create a new contact ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContactId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// An address book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable identity; never changes after creation.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number, stored as entered.
    pub phone: String,
}

impl Contact {
    /// Creates a new contact.
    #[must_use]
    pub fn new(
        id: ContactId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Returns a display string for the contact: "Name <email>".
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Returns the avatar initials for the contact.
    ///
    /// First letter of the first name part, plus the first letter of the last
    /// part when the name has more than one part.
    #[must_use]
    pub fn initials(&self) -> String {
        let mut parts = self.name.split_whitespace();
        let first = parts.next().and_then(|p| p.chars().next());
        let last = parts.last().and_then(|p| p.chars().next());

        first
            .into_iter()
            .chain(last)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Checks if the contact matches a lowercased search needle.
    ///
    /// Matches against name and email only; phone numbers are not searched.
    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
    }
}
