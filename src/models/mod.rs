//! Timetabling domain models.
//!
//! Core data types for weekly teaching timetables: the slot grid, the
//! scheduled entities (teachers, classrooms, classes, subjects,
//! courses), and the committed timetable itself.
//!
//! All models are plain serde-serializable records; the persistence
//! layer that loads and stores them lives outside this crate.

mod classroom;
mod course;
mod grid;
mod teacher;
mod time;
mod timetable;

pub use classroom::{Classroom, RoomKind};
pub use course::{BatchTeacherOverride, Class, Course, Subject};
pub use grid::{SlotGrid, SlotGridEntry};
pub use teacher::{Teacher, TimePreference};
pub use time::{intervals_overlap, Day, ParseTimeError, TimeOfDay};
pub use timetable::{PlacedSession, Timetable};
