//! Property identifiers and dynamic values for item attributes.
//!
//! # Responsibility
//! - Name every observable item attribute with one stable tag.
//! - Carry attribute values through the by-name property surface.
//!
//! # Invariants
//! - `ItemProperty::as_str()` is the tag delivered to notify observers.
//! - `parent` is not a property: it is container bookkeeping.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Observable attribute of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemProperty {
    /// Display label.
    Name,
    /// Free-form description.
    Text,
    /// Resource locator.
    Uri,
    /// Icon reference, path or URI.
    Icon,
    /// Opaque identifier string.
    Token,
    /// Caller-formatted timestamp.
    Added,
    /// Visit counter.
    Visits,
}

impl ItemProperty {
    /// All properties in declaration order.
    pub const ALL: [ItemProperty; 7] = [
        Self::Name,
        Self::Text,
        Self::Uri,
        Self::Icon,
        Self::Token,
        Self::Added,
        Self::Visits,
    ];

    /// Returns the notification tag for this property.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Text => "text",
            Self::Uri => "uri",
            Self::Icon => "icon",
            Self::Token => "token",
            Self::Added => "added",
            Self::Visits => "visits",
        }
    }

    /// Returns whether this property holds optional text.
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Visits)
    }

    fn expected_kind(self) -> &'static str {
        if self.is_text() {
            "text"
        } else {
            "int"
        }
    }
}

impl Display for ItemProperty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemProperty {
    type Err = ItemError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|property| property.as_str() == value)
            .ok_or_else(|| ItemError::UnknownProperty(value.to_string()))
    }
}

/// Dynamically typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    /// Value of a text property. `None` means absent.
    Text(Option<String>),
    /// Value of the visit counter.
    Int(i32),
}

impl PropertyValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
        }
    }
}

impl From<Option<&str>> for PropertyValue {
    fn from(value: Option<&str>) -> Self {
        Self::Text(value.map(str::to_string))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(Some(value.to_string()))
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

/// Errors from the by-name property surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// Property name does not match any item attribute.
    UnknownProperty(String),
    /// Value kind does not match the property kind.
    ValueTypeMismatch {
        property: ItemProperty,
        expected: &'static str,
        actual: &'static str,
    },
}

impl ItemError {
    pub(crate) fn mismatch(property: ItemProperty, value: &PropertyValue) -> Self {
        Self::ValueTypeMismatch {
            property,
            expected: property.expected_kind(),
            actual: value.kind(),
        }
    }
}

impl Display for ItemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownProperty(name) => write!(f, "unknown item property `{name}`"),
            Self::ValueTypeMismatch {
                property,
                expected,
                actual,
            } => write!(
                f,
                "item property `{property}` expects {expected}, got {actual}"
            ),
        }
    }
}

impl Error for ItemError {}
