//! Timetable generation and incremental placement validation.
//!
//! # Algorithm
//!
//! [`TimetableGenerator`] is a randomized greedy scheduler: it expands
//! courses into atomic session tasks (labs before lectures), shuffles
//! them, and places each with a bounded number of random day/slot
//! probes. Tasks that exhaust their budget are reported as
//! [`UnplacedTask`] warnings rather than failing the run — real
//! timetables are usually under-constrained, and the operator fills the
//! gaps by hand through the validator.
//!
//! [`PlacementValidator`] re-checks a single manual insert or move
//! against the committed timetable, reporting the precise conflicting
//! dimension (teacher, classroom, class/batch) or a lab-duration or
//! weekly-quota violation.

mod generator;
mod validator;

pub use generator::{
    GenerateOutcome, SessionKind, TimetableGenerator, UnplacedTask, LAB_BLOCK_SLOTS,
};
pub use validator::PlacementValidator;
