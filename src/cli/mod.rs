pub mod args;
pub mod booking;
pub mod call;
pub mod mentors;

pub use args::{BookCliArgs, CallCliArgs, Cli, CliCommand, SlotsCliArgs};
pub use booking::handle_book_command;
pub use call::handle_call_command;
pub use mentors::{handle_mentors_command, handle_session_types_command, handle_slots_command};

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Parses a `--date` flag, falling back to `today`.
fn parse_date_arg(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw)),
        None => Ok(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::parse_from(["mentorlink"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_slots_args() {
        let cli = Cli::parse_from([
            "mentorlink",
            "slots",
            "--mentor",
            "2",
            "--date",
            "2026-10-20",
            "--session-type",
            "career-guidance",
            "--seed",
            "9",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Some(CliCommand::Slots(args)) => {
                assert_eq!(args.mentor, "2");
                assert_eq!(args.session_type, "career-guidance");
                assert_eq!(args.seed, Some(9));
                assert!(!args.all);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_date_arg() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(parse_date_arg(None, today).unwrap(), today);
        assert_eq!(
            parse_date_arg(Some("2026-11-01"), today).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
        );
        assert!(parse_date_arg(Some("11/01/2026"), today).is_err());
    }
}
