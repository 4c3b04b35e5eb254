//! Read-only entity snapshot.
//!
//! The persistence layer hands the core a consistent in-memory view of
//! every scheduling entity; the core never reaches into connection or
//! session state. Lookups by id return a [`ConfigurationError`] for
//! dangling references so a single bad row aborts only the call that
//! touched it.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::{
    BatchTeacherOverride, Class, Classroom, Course, RoomKind, Subject, Teacher,
};

/// Everything the scheduler and validator need to know about the
/// institution, frozen for the duration of one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// All teachers.
    pub teachers: Vec<Teacher>,
    /// All classrooms.
    pub classrooms: Vec<Classroom>,
    /// All classes.
    pub classes: Vec<Class>,
    /// All subjects.
    pub subjects: Vec<Subject>,
    /// All teaching assignments.
    pub courses: Vec<Course>,
    /// Per-batch lab teacher substitutions.
    pub overrides: Vec<BatchTeacherOverride>,
}

impl EntitySnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a teacher by id.
    pub fn teacher(&self, id: &str) -> Result<&Teacher, ConfigurationError> {
        self.teachers
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ConfigurationError::UnknownTeacher(id.to_string()))
    }

    /// Looks up a classroom by id.
    pub fn classroom(&self, id: &str) -> Result<&Classroom, ConfigurationError> {
        self.classrooms
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ConfigurationError::UnknownClassroom(id.to_string()))
    }

    /// Looks up a class by id.
    pub fn class_group(&self, id: &str) -> Result<&Class, ConfigurationError> {
        self.classes
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ConfigurationError::UnknownClass(id.to_string()))
    }

    /// Looks up a subject by id.
    pub fn subject(&self, id: &str) -> Result<&Subject, ConfigurationError> {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ConfigurationError::UnknownSubject(id.to_string()))
    }

    /// Looks up a course by id.
    pub fn course(&self, id: &str) -> Result<&Course, ConfigurationError> {
        self.courses
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ConfigurationError::UnknownCourse(id.to_string()))
    }

    /// All theory rooms.
    pub fn theory_rooms(&self) -> Vec<&Classroom> {
        self.classrooms
            .iter()
            .filter(|c| c.kind == RoomKind::Theory)
            .collect()
    }

    /// All lab rooms.
    pub fn lab_rooms(&self) -> Vec<&Classroom> {
        self.classrooms
            .iter()
            .filter(|c| c.kind == RoomKind::Lab)
            .collect()
    }

    /// Effective teacher for one lab batch of a course.
    ///
    /// Returns the batch override when one matches the course's class,
    /// subject, and batch number, else the course's default teacher.
    pub fn lab_teacher<'a>(&'a self, course: &'a Course, batch: u8) -> &'a str {
        self.overrides
            .iter()
            .find(|o| {
                o.class_id == course.class_id
                    && o.subject_id == course.subject_id
                    && o.batch == batch
            })
            .map(|o| o.teacher_id.as_str())
            .unwrap_or(&course.teacher_id)
    }
}
