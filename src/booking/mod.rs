//! Session booking.
//!
//! Slot generation for a mentor's working day, the selector state machine
//! that drives a booking, and the hand-off of confirmed bookings to a
//! submitter.

pub mod selector;
pub mod session_type;
pub mod slots;
pub mod submission;

use chrono::NaiveDate;
use thiserror::Error;

pub use selector::{SelectorPhase, SessionSelector};
pub use session_type::{SessionType, SessionTypeInfo};
pub use slots::{
    AlwaysAvailable, Availability, RandomThinning, SlotGenerator, TimeSlot, WorkingWindow,
};
pub use submission::{
    BookingReceipt, BookingRequest, BookingSubmitter, HttpBookingSubmitter, LoggingSubmitter,
};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0} is in the past")]
    DateInPast(NaiveDate),

    #[error("unknown session type: {0}")]
    UnknownSessionType(String),

    #[error("no slot at position {0}")]
    UnknownSlot(usize),

    #[error("no time slot chosen")]
    NoSlotChosen,

    #[error("invalid working window: {0}")]
    InvalidWindow(String),

    #[error("invalid booking request: {0}")]
    InvalidRequest(String),

    #[error("booking submission failed: {0}")]
    Submission(String),
}
