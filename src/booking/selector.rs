//! Booking selector state machine.
//!
//! Holds the date, session type, computed slots and chosen slot for one
//! mentor. Any change of date or session type recomputes the slots and
//! drops the chosen slot.

use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{
    BookingError, BookingReceipt, BookingRequest, BookingSubmitter, SessionType, SlotGenerator,
    TimeSlot,
};
use crate::clock::Clock;
use crate::directory::Mentor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorPhase {
    /// Slots are computed, none chosen.
    SlotsComputed,
    SlotChosen,
}

impl SelectorPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SlotsComputed => "slots_computed",
            Self::SlotChosen => "slot_chosen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Browsing,
    Chosen(TimeSlot),
}

pub struct SessionSelector {
    mentor: Mentor,
    date: NaiveDate,
    session_type: SessionType,
    slots: Vec<TimeSlot>,
    selection: Selection,
    generator: SlotGenerator,
    clock: Arc<dyn Clock>,
}

impl SessionSelector {
    /// Starts on today's date with the default session type.
    pub fn new(mentor: Mentor, generator: SlotGenerator, clock: Arc<dyn Clock>) -> Self {
        let date = clock.today();
        let mut selector = Self {
            mentor,
            date,
            session_type: SessionType::default(),
            slots: Vec::new(),
            selection: Selection::Browsing,
            generator,
            clock,
        };
        selector.recompute();
        selector
    }

    pub fn mentor(&self) -> &Mentor {
        &self.mentor
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn chosen(&self) -> Option<&TimeSlot> {
        match &self.selection {
            Selection::Chosen(slot) => Some(slot),
            Selection::Browsing => None,
        }
    }

    pub fn phase(&self) -> SelectorPhase {
        match self.selection {
            Selection::Browsing => SelectorPhase::SlotsComputed,
            Selection::Chosen(_) => SelectorPhase::SlotChosen,
        }
    }

    /// Moves to `date`. Days before today are rejected without a state change.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        if date < self.clock.today() {
            debug!("Rejected calendar move to past date {}", date);
            return Err(BookingError::DateInPast(date));
        }
        self.date = date;
        self.recompute();
        Ok(())
    }

    /// Previous/next day navigation.
    pub fn shift_date(&mut self, days: i64) -> Result<NaiveDate, BookingError> {
        let target = Duration::try_days(days)
            .and_then(|delta| self.date.checked_add_signed(delta))
            .ok_or_else(|| {
                BookingError::InvalidRequest(format!("cannot move {} days from {}", days, self.date))
            })?;
        self.select_date(target)?;
        Ok(self.date)
    }

    pub fn select_session_type(&mut self, session_type: SessionType) {
        self.session_type = session_type;
        self.recompute();
    }

    pub fn choose_slot(&mut self, index: usize) -> Result<&TimeSlot, BookingError> {
        let slot = *self
            .slots
            .get(index)
            .ok_or(BookingError::UnknownSlot(index))?;
        self.selection = Selection::Chosen(slot);
        debug!("Chose slot {}-{}", slot.start_label(), slot.end_label());
        self.chosen().ok_or(BookingError::UnknownSlot(index))
    }

    /// The record that confirming would emit.
    pub fn pending_request(&self) -> Result<BookingRequest, BookingError> {
        let slot = self.chosen().ok_or(BookingError::NoSlotChosen)?;
        Ok(BookingRequest::new(&self.mentor, self.session_type, slot))
    }

    /// Submits the chosen slot. On success the selector goes back to
    /// browsing the same slots; on failure the choice is kept.
    pub async fn confirm(
        &mut self,
        submitter: &dyn BookingSubmitter,
    ) -> Result<BookingReceipt, BookingError> {
        let request = self.pending_request()?;
        match submitter.submit(&request).await {
            Ok(receipt) => {
                info!(
                    "Session booked with {} on {} at {}",
                    request.mentor_name, request.date, request.start_time
                );
                self.selection = Selection::Browsing;
                Ok(receipt)
            }
            Err(e) => {
                warn!("Booking submission failed: {}", e);
                Err(e)
            }
        }
    }

    fn recompute(&mut self) {
        self.slots = self
            .generator
            .generate(self.date, self.session_type.duration());
        self.selection = Selection::Browsing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{AlwaysAvailable, LoggingSubmitter, WorkingWindow};
    use crate::clock::FixedClock;
    use async_trait::async_trait;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn mentor() -> Mentor {
        Mentor {
            id: "7".to_string(),
            name: "Dr. Jane Smith".to_string(),
            avatar: String::new(),
            title: "Senior Software Engineer".to_string(),
            skills: vec![],
            presence: Default::default(),
            last_message: None,
        }
    }

    fn selector() -> SessionSelector {
        let clock = FixedClock::at(today(), NaiveTime::from_hms_opt(11, 20, 0).unwrap());
        SessionSelector::new(
            mentor(),
            SlotGenerator::new(WorkingWindow::default(), Box::new(AlwaysAvailable)),
            Arc::new(clock),
        )
    }

    struct FailingSubmitter;

    #[async_trait]
    impl BookingSubmitter for FailingSubmitter {
        async fn submit(&self, _: &BookingRequest) -> Result<BookingReceipt, BookingError> {
            Err(BookingError::Submission("endpoint down".into()))
        }
    }

    #[test]
    fn test_shift_out_of_calendar_range_is_rejected() {
        let mut s = selector();
        for days in [i64::MAX, 400_000_000] {
            assert!(matches!(
                s.shift_date(days),
                Err(BookingError::InvalidRequest(_))
            ));
            assert_eq!(s.date(), today());
        }
        assert_eq!(s.slots().len(), 16);
    }

    #[test]
    fn test_initial_state() {
        let s = selector();
        assert_eq!(s.date(), today());
        assert_eq!(s.session_type(), SessionType::Mentoring);
        assert_eq!(s.slots().len(), 16);
        assert_eq!(s.phase(), SelectorPhase::SlotsComputed);
        assert!(s.chosen().is_none());
    }

    #[test]
    fn test_changing_date_clears_choice() {
        let mut s = selector();
        s.choose_slot(3).unwrap();
        assert_eq!(s.phase(), SelectorPhase::SlotChosen);

        s.shift_date(1).unwrap();
        assert!(s.chosen().is_none());
        assert_eq!(s.date(), today() + Duration::days(1));
        assert_eq!(s.slots()[0].date(), s.date());
    }

    #[test]
    fn test_changing_session_type_clears_choice_and_recomputes() {
        let mut s = selector();
        s.choose_slot(0).unwrap();
        s.select_session_type(SessionType::CareerGuidance);

        assert!(s.chosen().is_none());
        assert_eq!(s.slots().len(), 15);
        assert!(s.slots().iter().all(|slot| slot.duration() == Duration::minutes(60)));
    }

    #[test]
    fn test_past_date_is_rejected_without_state_change() {
        let mut s = selector();
        s.choose_slot(2).unwrap();
        let chosen = *s.chosen().unwrap();

        let err = s.shift_date(-1).unwrap_err();
        assert!(matches!(err, BookingError::DateInPast(_)));
        assert_eq!(s.date(), today());
        assert_eq!(s.chosen(), Some(&chosen));
    }

    #[test]
    fn test_returning_to_today_is_allowed() {
        let mut s = selector();
        s.shift_date(2).unwrap();
        s.shift_date(-2).unwrap();
        assert_eq!(s.date(), today());
    }

    #[test]
    fn test_unknown_slot_index() {
        let mut s = selector();
        assert!(matches!(s.choose_slot(99), Err(BookingError::UnknownSlot(99))));
        assert_eq!(s.phase(), SelectorPhase::SlotsComputed);
    }

    #[tokio::test]
    async fn test_confirm_without_choice() {
        let mut s = selector();
        let err = s.confirm(&LoggingSubmitter).await.unwrap_err();
        assert!(matches!(err, BookingError::NoSlotChosen));
    }

    #[tokio::test]
    async fn test_confirm_emits_record_and_resets() {
        let mut s = selector();
        s.select_session_type(SessionType::CodeReview);
        s.choose_slot(1).unwrap();

        let receipt = s.confirm(&LoggingSubmitter).await.unwrap();
        assert_eq!(receipt.booking.mentor_id, "7");
        assert_eq!(receipt.booking.session_type, "Code Review");
        assert_eq!(receipt.booking.date, "2026-10-16");
        assert_eq!(receipt.booking.start_time, "09:30");
        assert_eq!(receipt.booking.end_time, "10:15");

        assert_eq!(s.phase(), SelectorPhase::SlotsComputed);
        assert_eq!(s.slots().len(), 15);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_choice() {
        let mut s = selector();
        s.choose_slot(4).unwrap();
        assert!(s.confirm(&FailingSubmitter).await.is_err());
        assert_eq!(s.phase(), SelectorPhase::SlotChosen);
    }
}
