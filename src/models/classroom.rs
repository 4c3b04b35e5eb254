//! Classroom model.

use serde::{Deserialize, Serialize};

/// Classroom classification.
///
/// Lab sessions may only occupy `Lab` rooms; theory lectures only
/// `Theory` rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomKind {
    /// Regular lecture room.
    Theory,
    /// Laboratory.
    Lab,
}

/// A classroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: String,
    /// Human-readable name (e.g. "CR-1", "LAB-2").
    pub name: String,
    /// Room classification.
    pub kind: RoomKind,
}

impl Classroom {
    /// Creates a theory room.
    pub fn theory(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind: RoomKind::Theory,
        }
    }

    /// Creates a lab room.
    pub fn lab(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind: RoomKind::Lab,
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether this is a lab room.
    #[inline]
    pub fn is_lab(&self) -> bool {
        self.kind == RoomKind::Lab
    }
}
