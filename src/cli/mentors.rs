//! CLI handlers for browsing mentors and their availability.

use anyhow::{bail, Result};

use super::{parse_date_arg, SlotsCliArgs};
use crate::app::build_slot_generator;
use crate::booking::{BookingError, SessionType};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::directory::{FixtureDirectory, MentorDirectory};

pub fn handle_session_types_command() -> Result<()> {
    println!("Session types:\n");
    for session_type in SessionType::ALL {
        println!(
            "  {}  {:<18} {:>3} min  {}",
            session_type.id(),
            session_type.name(),
            session_type.duration_minutes(),
            session_type.description()
        );
    }
    Ok(())
}

pub fn handle_mentors_command() -> Result<()> {
    let directory = FixtureDirectory::seeded();
    let mentors = directory.mentors();

    if mentors.is_empty() {
        println!("No mentors found.");
        return Ok(());
    }

    println!("Found {} mentor(s):\n", mentors.len());
    for mentor in mentors {
        println!("ID: {}", mentor.id);
        println!("Name: {} ({})", mentor.name, mentor.presence.as_str());
        println!("Title: {}", mentor.title);
        println!("Skills: {}", mentor.skills.join(", "));
        println!("---");
    }

    println!("\nTo see open slots, use: mentorlink slots --mentor <ID>");
    Ok(())
}

pub fn handle_slots_command(args: SlotsCliArgs) -> Result<()> {
    let config = Config::load()?;
    let directory = FixtureDirectory::seeded();

    let Some(mentor) = directory.mentor(&args.mentor) else {
        bail!("Mentor with ID {} not found", args.mentor);
    };

    let today = SystemClock.today();
    let date = parse_date_arg(args.date.as_deref(), today)?;
    if date < today {
        return Err(BookingError::DateInPast(date).into());
    }
    let session_type: SessionType = args.session_type.parse()?;

    let mut generator = build_slot_generator(&config.booking, args.seed)?;
    let slots = if args.all {
        generator.candidates(date, session_type.duration())
    } else {
        generator.generate(date, session_type.duration())
    };

    println!(
        "{} with {} on {}:\n",
        session_type,
        mentor.name,
        date.format("%A, %B %-d, %Y")
    );

    if slots.is_empty() {
        println!("No available time slots for this date.");
        return Ok(());
    }

    for slot in &slots {
        println!("  {} - {}", slot.start_label(), slot.end_label());
    }
    println!("\n{} slot(s)", slots.len());

    Ok(())
}
