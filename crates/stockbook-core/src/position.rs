//! Positions — named locations where stock exists.
//!
//! Positions are stable reference data created at setup time. Flat
//! structure, no hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique position code (e.g. "vitrine", "deposito").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionCode(pub String);

impl PositionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PositionCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of position in space.
///
/// PHYSICAL: a place where product exists in the real world
/// (showcase, storage, oven, in transit). VIRTUAL: an accounting
/// concept with no real-world counterpart (losses, inventory
/// adjustments, internal consumption).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionKind {
    #[default]
    Physical,
    Virtual,
}

impl fmt::Display for PositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physical => write!(f, "physical"),
            Self::Virtual => write!(f, "virtual"),
        }
    }
}

/// A named stock location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Unique code.
    pub code: PositionCode,
    /// Human-readable name.
    pub name: String,
    /// Physical or virtual.
    pub kind: PositionKind,
    /// Whether stock here can be sold directly.
    pub is_saleable: bool,
    /// Default position for new quants when none is given.
    pub is_default: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Position {
    /// Create a physical, non-saleable position.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: PositionCode::new(code),
            name: name.into(),
            kind: PositionKind::Physical,
            is_saleable: false,
            is_default: false,
            created_at: Utc::now(),
        }
    }

    /// Mark as saleable.
    #[must_use]
    pub fn saleable(mut self) -> Self {
        self.is_saleable = true;
        self
    }

    /// Mark as virtual (accounting-only).
    #[must_use]
    pub fn virtual_kind(mut self) -> Self {
        self.kind = PositionKind::Virtual;
        self
    }

    /// Mark as the default position.
    #[must_use]
    pub fn default_position(mut self) -> Self {
        self.is_default = true;
        self
    }
}
