//! Teacher model.

use serde::{Deserialize, Serialize};

/// Soft time-of-day preference for a teacher.
///
/// Only influences the order in which the generator tries slots; it is
/// never a hard constraint and never blocks a placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePreference {
    /// No preference.
    #[default]
    None,
    /// Prefer slots in the first half of the day.
    Morning,
    /// Prefer slots in the second half of the day.
    Afternoon,
}

/// A teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Soft time-of-day preference.
    pub preference: TimePreference,
}

impl Teacher {
    /// Creates a teacher with no preference.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            preference: TimePreference::None,
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the time-of-day preference.
    pub fn with_preference(mut self, preference: TimePreference) -> Self {
        self.preference = preference;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_builder() {
        let t = Teacher::new("T1")
            .with_name("Prof. Ghule")
            .with_preference(TimePreference::Morning);
        assert_eq!(t.id, "T1");
        assert_eq!(t.name, "Prof. Ghule");
        assert_eq!(t.preference, TimePreference::Morning);
    }

    #[test]
    fn test_default_preference() {
        assert_eq!(Teacher::new("T1").preference, TimePreference::None);
        assert_eq!(TimePreference::default(), TimePreference::None);
    }
}
