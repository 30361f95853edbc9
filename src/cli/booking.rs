//! Interactive booking.
//!
//! Walks the session selector through a terminal: pick a session type, page
//! through days, pick a slot, confirm.

use anyhow::{bail, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect};
use std::sync::Arc;

use super::{parse_date_arg, BookCliArgs};
use crate::app::{build_slot_generator, build_submitter};
use crate::booking::{BookingSubmitter, LoggingSubmitter, SessionSelector, SessionType};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::directory::{FixtureDirectory, MentorDirectory};

const PREVIOUS_DAY: &str = "<- Previous day";
const NEXT_DAY: &str = "Next day ->";

pub async fn handle_book_command(args: BookCliArgs) -> Result<()> {
    let config = Config::load()?;
    let directory = FixtureDirectory::seeded();

    let Some(mentor) = directory.mentor(&args.mentor) else {
        bail!("Mentor with ID {} not found", args.mentor);
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let generator = build_slot_generator(&config.booking, args.seed)?;
    let mut selector = SessionSelector::new(mentor, generator, clock.clone());

    let date = parse_date_arg(args.date.as_deref(), clock.today())?;
    if date != selector.date() {
        selector.select_date(date)?;
    }

    let theme = ColorfulTheme::default();

    let session_type = match args.session_type.as_deref() {
        Some(raw) => raw.parse::<SessionType>()?,
        None => {
            let labels: Vec<String> = SessionType::ALL
                .iter()
                .map(|t| format!("{} - {}", t, t.description()))
                .collect();
            let index = FuzzySelect::with_theme(&theme)
                .with_prompt("Session type")
                .items(&labels)
                .default(0)
                .interact()?;
            SessionType::ALL[index]
        }
    };
    selector.select_session_type(session_type);

    println!(
        "\nBooking {} with {}",
        selector.session_type(),
        selector.mentor().name
    );

    loop {
        let mut items: Vec<String> = selector
            .slots()
            .iter()
            .map(|slot| format!("{} - {}", slot.start_label(), slot.end_label()))
            .collect();
        let slot_count = items.len();
        if slot_count == 0 {
            println!("No available time slots for this date.");
        }
        items.push(PREVIOUS_DAY.to_string());
        items.push(NEXT_DAY.to_string());

        let index = FuzzySelect::with_theme(&theme)
            .with_prompt(selector.date().format("%A, %B %-d, %Y").to_string())
            .items(&items)
            .default(0)
            .interact()?;

        if index < slot_count {
            selector.choose_slot(index)?;
            break;
        }

        let step = if items[index] == PREVIOUS_DAY { -1 } else { 1 };
        if let Err(e) = selector.shift_date(step) {
            println!("{}", e);
        }
    }

    let request = selector.pending_request()?;
    println!();
    println!("Mentor:  {}", request.mentor_name);
    println!("Session: {}", request.session_type);
    println!("Date:    {}", request.date);
    println!("Time:    {} - {}", request.start_time, request.end_time);
    println!();

    let proceed = Confirm::with_theme(&theme)
        .with_prompt("Book this session?")
        .default(true)
        .interact()?;

    if !proceed {
        println!("Booking cancelled.");
        return Ok(());
    }

    let submitter: Arc<dyn BookingSubmitter> = if args.dry_run {
        Arc::new(LoggingSubmitter)
    } else {
        build_submitter(&config.booking)
    };

    let receipt = selector.confirm(submitter.as_ref()).await?;
    println!("Session booked! Reference: {}", receipt.reference);

    Ok(())
}
