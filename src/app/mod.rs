use crate::api::{ApiServer, ApiState};
use crate::booking::{
    BookingSubmitter, HttpBookingSubmitter, LoggingSubmitter, RandomThinning, SlotGenerator,
};
use crate::clock::SystemClock;
use crate::config::{BookingConfig, Config};
use crate::directory::FixtureDirectory;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn run_service() -> Result<()> {
    info!("Starting mentorlink service");

    let config = Config::load()?;

    let generator = build_slot_generator(&config.booking, None)?;
    let submitter = build_submitter(&config.booking);
    let state = ApiState::new(
        Arc::new(FixtureDirectory::seeded()),
        generator,
        submitter,
        Arc::new(SystemClock),
    );

    let api_server = ApiServer::new(state, &config.server);

    info!("mentorlink is ready!");
    info!(
        "Try: curl {}/mentors/1/slots?session_type=2",
        config.server.base_url()
    );

    tokio::select! {
        result = api_server.start() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    }
}

/// Builds the generator for the configured working day. A `seed` makes the
/// availability draw reproducible.
pub fn build_slot_generator(booking: &BookingConfig, seed: Option<u64>) -> Result<SlotGenerator> {
    let window = booking
        .working_window()
        .context("Invalid [booking] working hours in config")?;
    let thinning = match seed {
        Some(seed) => RandomThinning::seeded(booking.unavailable_ratio, seed),
        None => RandomThinning::new(booking.unavailable_ratio),
    };
    Ok(SlotGenerator::new(window, Box::new(thinning)))
}

pub fn build_submitter(booking: &BookingConfig) -> Arc<dyn BookingSubmitter> {
    match booking.submit_url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            info!("Bookings will be submitted to {}", url);
            Arc::new(HttpBookingSubmitter::new(url))
        }
        Some(_) => {
            warn!("Ignoring empty booking.submit_url, bookings will only be logged");
            Arc::new(LoggingSubmitter)
        }
        None => Arc::new(LoggingSubmitter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_seeded_generators_agree() {
        let booking = BookingConfig::default();
        let mut a = build_slot_generator(&booking, Some(7)).unwrap();
        let mut b = build_slot_generator(&booking, Some(7)).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let duration = chrono::Duration::minutes(45);
        assert_eq!(a.generate(date, duration), b.generate(date, duration));
    }

    #[test]
    fn test_bad_hours_fail_to_build() {
        let booking = BookingConfig {
            closes_at: "08:00".to_string(),
            ..Default::default()
        };
        assert!(build_slot_generator(&booking, None).is_err());
    }
}
