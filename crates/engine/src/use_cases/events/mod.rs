//! Event use cases.
//!
//! Scheduling, RSVPs, and attendance recording with its XP payout.

mod attendance;
mod error;
mod queries;
mod rsvp;
mod schedule_event;

use std::sync::Arc;

pub use attendance::{AttendanceOutcome, RecordAttendance};
pub use error::EventError;
pub use queries::ListEvents;
pub use rsvp::RsvpToEvent;
pub use schedule_event::{ScheduleEvent, ScheduleEventInput};

/// Container for event use cases.
pub struct EventUseCases {
    pub schedule: Arc<ScheduleEvent>,
    pub list: Arc<ListEvents>,
    pub rsvp: Arc<RsvpToEvent>,
    pub attendance: Arc<RecordAttendance>,
}
