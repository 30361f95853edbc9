//! Bookable time-slot generation.
//!
//! Candidates are laid out on a fixed stride across the working window,
//! then an [`Availability`] source decides which survive. The default
//! source drops a fixed share at random to stand in for a mentor's real
//! calendar.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::BookingError;

/// Share of candidates dropped by the default availability source.
pub const DEFAULT_UNAVAILABLE_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSlot {
    pub fn new(start: NaiveDateTime, duration: Duration) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// `HH:MM` start label.
    pub fn start_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    /// `HH:MM` end label.
    pub fn end_label(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}

/// Daily window in which sessions may be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    opens_at: NaiveTime,
    closes_at: NaiveTime,
    stride: Duration,
}

impl WorkingWindow {
    pub fn new(
        opens_at: NaiveTime,
        closes_at: NaiveTime,
        stride: Duration,
    ) -> Result<Self, BookingError> {
        if opens_at >= closes_at {
            return Err(BookingError::InvalidWindow(format!(
                "opens at {} but closes at {}",
                opens_at.format("%H:%M"),
                closes_at.format("%H:%M")
            )));
        }
        if stride <= Duration::zero() {
            return Err(BookingError::InvalidWindow(format!(
                "stride must be positive, got {} minutes",
                stride.num_minutes()
            )));
        }
        Ok(Self {
            opens_at,
            closes_at,
            stride,
        })
    }

    pub fn opens_at(&self) -> NaiveTime {
        self.opens_at
    }

    pub fn closes_at(&self) -> NaiveTime {
        self.closes_at
    }

    pub fn stride(&self) -> Duration {
        self.stride
    }

    /// Every slot of `duration` that fits inside the window on `date`,
    /// before any availability filtering. Ordered by start.
    pub fn candidates(&self, date: NaiveDate, duration: Duration) -> Vec<TimeSlot> {
        if duration <= Duration::zero() {
            return Vec::new();
        }

        let close = date.and_time(self.closes_at);
        let mut start = date.and_time(self.opens_at);
        let mut slots = Vec::new();

        while start < close {
            let slot = TimeSlot::new(start, duration);
            if slot.end <= close {
                slots.push(slot);
            }
            start += self.stride;
        }

        slots
    }
}

impl Default for WorkingWindow {
    fn default() -> Self {
        Self {
            opens_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            closes_at: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            stride: Duration::minutes(30),
        }
    }
}

/// Decides whether a candidate slot can be offered.
pub trait Availability: Send {
    fn is_available(&mut self, slot: &TimeSlot) -> bool;
}

/// Offers every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAvailable;

impl Availability for AlwaysAvailable {
    fn is_available(&mut self, _slot: &TimeSlot) -> bool {
        true
    }
}

/// Drops each candidate independently with a fixed probability.
pub struct RandomThinning<R = StdRng> {
    rng: R,
    unavailable_ratio: f64,
}

impl RandomThinning<StdRng> {
    pub fn new(unavailable_ratio: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), unavailable_ratio)
    }

    /// Reproducible thinning for tests and `--seed`.
    pub fn seeded(unavailable_ratio: f64, seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), unavailable_ratio)
    }
}

impl<R: Rng> RandomThinning<R> {
    pub fn with_rng(rng: R, unavailable_ratio: f64) -> Self {
        let unavailable_ratio = if unavailable_ratio.is_nan() {
            0.0
        } else {
            unavailable_ratio.clamp(0.0, 1.0)
        };
        Self {
            rng,
            unavailable_ratio,
        }
    }

    pub fn unavailable_ratio(&self) -> f64 {
        self.unavailable_ratio
    }
}

impl<R: Rng + Send> Availability for RandomThinning<R> {
    fn is_available(&mut self, _slot: &TimeSlot) -> bool {
        !self.rng.gen_bool(self.unavailable_ratio)
    }
}

pub struct SlotGenerator {
    window: WorkingWindow,
    availability: Box<dyn Availability>,
}

impl SlotGenerator {
    pub fn new(window: WorkingWindow, availability: Box<dyn Availability>) -> Self {
        Self {
            window,
            availability,
        }
    }

    /// Default window with 30% random unavailability.
    pub fn with_random_thinning() -> Self {
        Self::new(
            WorkingWindow::default(),
            Box::new(RandomThinning::new(DEFAULT_UNAVAILABLE_RATIO)),
        )
    }

    pub fn window(&self) -> &WorkingWindow {
        &self.window
    }

    pub fn candidates(&self, date: NaiveDate, duration: Duration) -> Vec<TimeSlot> {
        self.window.candidates(date, duration)
    }

    /// Candidates that survive the availability source. May be empty.
    pub fn generate(&mut self, date: NaiveDate, duration: Duration) -> Vec<TimeSlot> {
        let candidates = self.window.candidates(date, duration);
        let total = candidates.len();
        let slots: Vec<TimeSlot> = candidates
            .into_iter()
            .filter(|slot| self.availability.is_available(slot))
            .collect();

        debug!(
            "Generated {} of {} candidate slots for {} ({} min)",
            slots.len(),
            total,
            date,
            duration.num_minutes()
        );
        slots
    }
}
