//! Subjects, classes, and teaching assignments.
//!
//! A [`Course`] is the unit the scheduler expands into weekly session
//! tasks: teacher X teaches subject Y to class Z, so many times a week.
//! Classes may be split into numbered batches; labs are then scheduled
//! once per batch, with an optional per-batch substitute teacher via
//! [`BatchTeacherOverride`].

use serde::{Deserialize, Serialize};

/// A subject (course of study).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Short subject code (e.g. "CS201").
    pub code: String,
}

impl Subject {
    /// Creates a subject.
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            code: code.into(),
        }
    }

    /// Sets the subject name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A class (student group), optionally split into lab batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    /// Unique class identifier.
    pub id: String,
    /// Human-readable name (e.g. "TE-B1").
    pub name: String,
    /// Number of lab batches the class splits into (at least 1).
    pub batch_count: u8,
}

impl Class {
    /// Creates an unsplit class (one batch).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            batch_count: 1,
        }
    }

    /// Sets the class name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the number of lab batches.
    pub fn with_batches(mut self, batch_count: u8) -> Self {
        self.batch_count = batch_count;
        self
    }

    /// Batch numbers of this class (`1..=batch_count`).
    pub fn batches(&self) -> impl Iterator<Item = u8> {
        1..=self.batch_count
    }
}

/// A teaching assignment: a teacher delivers a subject to a class.
///
/// For a lab course, `weekly_sessions` is an hour count; the scheduler
/// places `weekly_sessions / 2` two-slot blocks per batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Class taught.
    pub class_id: String,
    /// Subject taught.
    pub subject_id: String,
    /// Default teacher (lab batches may override per batch).
    pub teacher_id: String,
    /// Sessions per week (hours per week for labs).
    pub weekly_sessions: u32,
    /// Whether this is a lab course.
    pub is_lab: bool,
    /// Fixed lab room; `None` lets the scheduler pick any lab room.
    pub lab_classroom_id: Option<String>,
}

impl Course {
    /// Creates a theory course.
    pub fn new(
        id: impl Into<String>,
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
            weekly_sessions: 1,
            is_lab: false,
            lab_classroom_id: None,
        }
    }

    /// Sets the weekly session count (hours per week for labs).
    pub fn with_weekly_sessions(mut self, weekly_sessions: u32) -> Self {
        self.weekly_sessions = weekly_sessions;
        self
    }

    /// Marks this course as a lab.
    pub fn as_lab(mut self) -> Self {
        self.is_lab = true;
        self
    }

    /// Pins lab sessions to a fixed lab room.
    pub fn with_lab_room(mut self, classroom_id: impl Into<String>) -> Self {
        self.lab_classroom_id = Some(classroom_id.into());
        self
    }

    /// Number of two-slot lab blocks per batch per week.
    ///
    /// Integer floor of the weekly hour count; a trailing odd hour is
    /// dropped (the generator logs it).
    #[inline]
    pub fn lab_blocks(&self) -> u32 {
        self.weekly_sessions / 2
    }

    /// Whether the lab hour count leaves an unschedulable odd hour.
    #[inline]
    pub fn has_odd_lab_hour(&self) -> bool {
        self.is_lab && self.weekly_sessions % 2 == 1
    }
}

/// Per-batch substitute teacher for a lab course.
///
/// Used only when placing lab sessions; theory lectures always use the
/// course's default teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTeacherOverride {
    /// Class whose batch is overridden.
    pub class_id: String,
    /// Subject of the lab course.
    pub subject_id: String,
    /// Batch number (1-based).
    pub batch: u8,
    /// Substitute teacher.
    pub teacher_id: String,
}

impl BatchTeacherOverride {
    /// Creates an override.
    pub fn new(
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        batch: u8,
        teacher_id: impl Into<String>,
    ) -> Self {
        Self {
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            batch,
            teacher_id: teacher_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_batches() {
        let c = Class::new("C1").with_name("TE-B1").with_batches(3);
        assert_eq!(c.batches().collect::<Vec<_>>(), vec![1, 2, 3]);

        let unsplit = Class::new("C2");
        assert_eq!(unsplit.batch_count, 1);
        assert_eq!(unsplit.batches().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_course_builder() {
        let c = Course::new("K1", "C1", "S1", "T1").with_weekly_sessions(3);
        assert!(!c.is_lab);
        assert_eq!(c.weekly_sessions, 3);
        assert!(c.lab_classroom_id.is_none());
    }

    #[test]
    fn test_lab_blocks_floor() {
        let lab = Course::new("K1", "C1", "S1", "T1")
            .as_lab()
            .with_weekly_sessions(4)
            .with_lab_room("R9");
        assert_eq!(lab.lab_blocks(), 2);
        assert!(!lab.has_odd_lab_hour());
        assert_eq!(lab.lab_classroom_id.as_deref(), Some("R9"));

        let odd = Course::new("K2", "C1", "S1", "T1")
            .as_lab()
            .with_weekly_sessions(5);
        assert_eq!(odd.lab_blocks(), 2);
        assert!(odd.has_odd_lab_hour());
    }

    #[test]
    fn test_subject() {
        let s = Subject::new("S1", "CS201").with_name("Data Structures");
        assert_eq!(s.code, "CS201");
        assert_eq!(s.name, "Data Structures");
    }
}
