//! Weekly teaching timetable engine.
//!
//! Assigns recurring weekly sessions (theory lectures and two-slot lab
//! blocks, optionally split per student batch) to day/time slots with
//! no teacher, classroom, or class/batch double booking, honoring soft
//! teacher time-of-day preferences.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `SlotGrid`, `Teacher`, `Classroom`,
//!   `Class`, `Subject`, `Course`, `BatchTeacherOverride`,
//!   `PlacedSession`, `Timetable`
//! - **`snapshot`**: Read-only entity view handed in by the caller
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling
//!   references, batch ranges)
//! - **`conflict`**: Per-slot occupancy map used during one pass
//! - **`scheduler`**: Bulk generation (`TimetableGenerator`) and
//!   single-edit checking (`PlacementValidator`)
//! - **`error`**: Configuration errors and placement conflict reasons
//!
//! # Architecture
//!
//! The core owns no persistence, transport, or rendering: the caller
//! loads an [`snapshot::EntitySnapshot`] and a
//! [`models::SlotGrid`], runs the generator or the validator, and
//! commits the result to the [`models::Timetable`] store. All calls are
//! synchronous and single-threaded; the caller serializes mutations.
//!
//! # Example
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use weektable::models::{Class, Classroom, Course, SlotGrid, Subject, Teacher, Timetable};
//! use weektable::scheduler::TimetableGenerator;
//! use weektable::snapshot::EntitySnapshot;
//!
//! let snapshot = EntitySnapshot {
//!     teachers: vec![Teacher::new("T1").with_name("Prof. Ghule")],
//!     classrooms: vec![Classroom::theory("R1").with_name("CR-1")],
//!     classes: vec![Class::new("C1").with_name("TE-B1")],
//!     subjects: vec![Subject::new("S1", "CS201").with_name("Data Structures")],
//!     courses: vec![Course::new("K1", "C1", "S1", "T1").with_weekly_sessions(3)],
//!     overrides: vec![],
//! };
//! let grid = SlotGrid::standard();
//! let mut rng = SmallRng::seed_from_u64(1);
//!
//! let outcome = TimetableGenerator::new()
//!     .generate(&snapshot, &grid, &mut rng)
//!     .unwrap();
//! let mut timetable = Timetable::new();
//! timetable.commit(outcome.sessions);
//! assert_eq!(timetable.sessions_for_class("C1").len(), 3);
//! ```

pub mod conflict;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod snapshot;
pub mod validation;
