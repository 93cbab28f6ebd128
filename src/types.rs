//! Common types for postal-variants.

use std::fmt;

use crate::error::Error;

/// Hierarchy level of a recognized address part, most general first.
///
/// The concrete integer values form the contract with the external
/// gazetteer/matcher; [`Level::try_from`] fails loudly on an unknown
/// integer instead of mis-sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Region / oblast
    Region = 1,
    /// District / raion
    District = 2,
    /// City, town or settlement
    Location = 3,
    /// Settlement inside a location
    Sublocation = 4,
    /// Street, avenue, boulevard
    Street = 5,
    /// House
    House = 6,
}

impl Level {
    /// The integer value used on the matcher wire.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Level {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Error> {
        match value {
            1 => Ok(Level::Region),
            2 => Ok(Level::District),
            3 => Ok(Level::Location),
            4 => Ok(Level::Sublocation),
            5 => Ok(Level::Street),
            6 => Ok(Level::House),
            other => Err(Error::invalid_level(other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Region => "region",
            Level::District => "district",
            Level::Location => "location",
            Level::Sublocation => "sublocation",
            Level::Street => "street",
            Level::House => "house",
        };
        write!(f, "{name}")
    }
}

/// A hierarchical entity matched by the external gazetteer against one or
/// more tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecognizedPart {
    /// Short name (e.g. "Тверская")
    pub short_name: String,
    /// Display name (e.g. "Тверская область")
    pub name: String,
    /// Gazetteer identifier
    pub id: String,
    /// Identifier of the parent entity
    pub parent_id: String,
    /// Hierarchy level
    pub level: Level,
    /// Postal code, empty when unknown
    pub postal_code: String,
}

impl RecognizedPart {
    /// Create a part with just a name and level; ids and postal code empty.
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        Self {
            short_name: String::new(),
            name: name.into(),
            id: String::new(),
            parent_id: String::new(),
            level,
            postal_code: String::new(),
        }
    }

    /// Set the postal code.
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = postal_code.into();
        self
    }

    /// Set the gazetteer id and parent id.
    pub fn with_ids(mut self, id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        self.id = id.into();
        self.parent_id = parent_id.into();
        self
    }

    /// Set the short name.
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }
}

/// Structured representation of a resolved address.
///
/// Every field is a plain string; empty means "not determined". The value is
/// immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Postal code of the most specific recognized part
    pub postal_code: String,
    /// Region / oblast name
    pub region: String,
    /// District name
    pub district: String,
    /// Locality (city, town, settlement)
    pub location: String,
    /// Street name
    pub street: String,
    /// House number
    pub house_number: String,
    /// Building / block designator assembled from leftover tokens
    pub building: String,
    /// Apartment, taken from the trailing unconsumed token
    pub apartment: String,
}

impl Address {
    /// Check whether no field was determined.
    pub fn is_empty(&self) -> bool {
        self.postal_code.is_empty()
            && self.region.is_empty()
            && self.district.is_empty()
            && self.location.is_empty()
            && self.street.is_empty()
            && self.house_number.is_empty()
            && self.building.is_empty()
            && self.apartment.is_empty()
    }
}
