//! API route modules.

pub mod booking;
pub mod chat;
pub mod dashboard;
pub mod mentors;
