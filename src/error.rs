//! Error taxonomy for generation and placement validation.
//!
//! Three tiers, kept deliberately separate:
//!
//! - [`ConfigurationError`]: malformed input (bad grid, dangling entity
//!   reference). Fatal to the single call that hit it; the committed
//!   store is left untouched.
//! - [`ConflictReason`]: an expected, user-facing rejection of one
//!   proposed placement. Always recoverable by picking different
//!   parameters.
//! - Exhausted retry budgets during bulk generation are *not* errors:
//!   they surface as [`UnplacedTask`](crate::scheduler::UnplacedTask)
//!   warnings and never abort the run.

use thiserror::Error;

use crate::models::{Day, TimeOfDay};

/// Malformed input that aborts the current call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The grid has no teachable entries (or no days).
    #[error("slot grid has no teachable slots")]
    EmptyGrid,
    /// Grid entries are out of order, overlapping, or empty.
    #[error("slot grid entry {index} is out of order, overlapping, or empty")]
    MalformedGrid { index: usize },
    /// A referenced teacher id is absent from the snapshot.
    #[error("unknown teacher id '{0}'")]
    UnknownTeacher(String),
    /// A referenced classroom id is absent from the snapshot.
    #[error("unknown classroom id '{0}'")]
    UnknownClassroom(String),
    /// A referenced class id is absent from the snapshot.
    #[error("unknown class id '{0}'")]
    UnknownClass(String),
    /// A referenced subject id is absent from the snapshot.
    #[error("unknown subject id '{0}'")]
    UnknownSubject(String),
    /// A referenced course id is absent from the snapshot.
    #[error("unknown course id '{0}'")]
    UnknownCourse(String),
    /// A proposed interval does not touch any teachable slot.
    #[error("interval {start}-{end} does not map onto the slot grid")]
    OffGrid { start: TimeOfDay, end: TimeOfDay },
}

/// Why a proposed placement was rejected.
///
/// Returned by the incremental validator so the caller can show a
/// precise message per conflicting dimension.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictReason {
    /// The teacher already has a session in the proposed interval.
    #[error("teacher '{teacher_id}' is already booked on {day} during {start}-{end}")]
    TeacherConflict {
        teacher_id: String,
        day: Day,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    /// The classroom is already occupied in the proposed interval.
    #[error("classroom '{classroom_id}' is already occupied on {day} during {start}-{end}")]
    ClassroomConflict {
        classroom_id: String,
        day: Day,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    /// The class (or the specific batch) already has a session there.
    #[error("class '{class_id}' already has a session on {day} during {start}-{end}")]
    ClassOrBatchConflict {
        class_id: String,
        batch: Option<u8>,
        day: Day,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    /// A lab session's interval does not equal the required contiguous
    /// block exactly.
    #[error("lab session must span exactly {expected_slots} contiguous teaching slots")]
    DurationMismatch { expected_slots: usize },
    /// The course already has its full weekly quota of sessions placed.
    #[error("course '{course_id}' already has its weekly quota of {quota} sessions")]
    WeeklyQuotaExceeded { course_id: String, quota: u32 },
}

/// Either tier of failure from the incremental validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// Expected placement conflict.
    #[error(transparent)]
    Conflict(#[from] ConflictReason),
    /// Malformed input; the check could not be performed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
