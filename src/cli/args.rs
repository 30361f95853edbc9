use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mentorlink")]
#[command(about = "Book mentoring sessions and join calls", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the local HTTP service (default)
    Serve,
    /// Print version information
    Version,
    /// List the session types that can be booked
    SessionTypes,
    /// List mentors
    Mentors,
    /// Show bookable slots for a mentor on a day
    Slots(SlotsCliArgs),
    /// Book a session interactively
    Book(BookCliArgs),
    /// Start a video call
    Call(CallCliArgs),
}

#[derive(ClapArgs, Debug)]
pub struct SlotsCliArgs {
    /// Mentor ID
    #[arg(short, long)]
    pub mentor: String,
    /// Day to show (YYYY-MM-DD format), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// Session type ID or name (e.g. 2 or code-review)
    #[arg(short, long, default_value = "1")]
    pub session_type: String,
    /// Show every slot in the working day, ignoring availability
    #[arg(long)]
    pub all: bool,
    /// Seed for a reproducible availability draw
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(ClapArgs, Debug)]
pub struct BookCliArgs {
    /// Mentor ID
    #[arg(short, long)]
    pub mentor: String,
    /// Day to book (YYYY-MM-DD format), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// Session type ID or name; prompts when omitted
    #[arg(short, long)]
    pub session_type: Option<String>,
    /// Seed for a reproducible availability draw
    #[arg(long)]
    pub seed: Option<u64>,
    /// Log the booking instead of submitting it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ClapArgs, Debug)]
pub struct CallCliArgs {
    /// Room to join, a new one is generated when omitted
    #[arg(short, long)]
    pub room: Option<String>,
}
