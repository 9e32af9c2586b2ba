#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ot: personal sales/offer tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Explicit output format (overrides --json and the FORMAT env var).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Data directory (overrides OFFERTRACK_HOME and the platform default).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags, environment, and TTY detection.
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Initialize the tracker store",
        after_help = "EXAMPLES:\n    # Create the store in the default data directory\n    ot init\n\n    # Keep the store somewhere specific\n    ot --data-dir ~/sales init"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Record a new offer",
        after_help = "EXAMPLES:\n    # Log an offer\n    ot log --case CASE-1042 --channel phone --type upgrade\n\n    # Log with a rating and an immediate follow-up\n    ot log --case CASE-1042 --channel chat --type new --csat positive --followup 2024-07-01"
    )]
    Log(cmd::log::LogArgs),

    #[command(
        next_help_heading = "Read",
        about = "List offers",
        after_help = "EXAMPLES:\n    # Everything overdue\n    ot list --status overdue\n\n    # Converted phone offers as JSON\n    ot list --channel phone --converted --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one offer",
        after_help = "EXAMPLES:\n    # Show an offer (unique prefix is enough)\n    ot show of-x7k"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Update an offer's fields",
        after_help = "EXAMPLES:\n    # Rate the customer interaction\n    ot edit of-x7k --csat negative\n\n    # Replace the notes\n    ot edit of-x7k --notes \"asked for a callback in May\""
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Mark an offer as converted",
        after_help = "EXAMPLES:\n    # Converted today\n    ot convert of-x7k\n\n    # Converted on a specific date\n    ot convert of-x7k --date 2024-06-20"
    )]
    Convert(cmd::convert::ConvertArgs),

    #[command(
        next_help_heading = "Follow-up",
        about = "Schedule, complete, or clear follow-ups",
        after_help = "EXAMPLES:\n    # Schedule a follow-up\n    ot followup add of-x7k 2024-07-01\n\n    # Complete the pending one\n    ot followup done of-x7k\n\n    # Drop the pending one, keep history\n    ot followup clear of-x7k"
    )]
    Followup(cmd::followup::FollowupArgs),

    #[command(
        next_help_heading = "Follow-up",
        about = "Follow-up agenda: overdue, today, upcoming",
        after_help = "EXAMPLES:\n    # What needs attention\n    ot agenda\n\n    # Include completed history\n    ot agenda --all"
    )]
    Agenda(cmd::agenda::AgendaArgs),

    #[command(
        next_help_heading = "Notify",
        about = "Run the follow-up check and manage notifications",
        after_help = "EXAMPLES:\n    # One scan\n    ot notify check\n\n    # Unread alerts\n    ot notify list --unread\n\n    # Dismiss one alert (it returns while the follow-up stays due)\n    ot notify dismiss nt-abc123"
    )]
    Notify(cmd::notify::NotifyArgs),

    #[command(
        next_help_heading = "Notify",
        about = "Keep checking on a fixed period",
        after_help = "EXAMPLES:\n    # Check hourly until killed\n    ot watch\n\n    # One immediate check, then exit\n    ot watch --cycles 1"
    )]
    Watch(cmd::watch::WatchArgs),

    #[command(
        next_help_heading = "Insight",
        about = "Streaks, conversion, csat, and weekly trend",
        after_help = "EXAMPLES:\n    # The full picture\n    ot stats\n\n    # Trailing quarter, machine readable\n    ot stats --weeks 13 --json"
    )]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("OFFERTRACK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "offertrack=debug,info"
        } else {
            "offertrack=info,warn"
        })
    });

    let format = env::var("OFFERTRACK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let root = offertrack_core::config::resolve_data_root(cli.data_dir.clone());
    let output = cli.output_mode();

    let result = match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &root),
        Commands::Log(ref args) => cmd::log::run_log(args, output, &root),
        Commands::List(ref args) => cmd::list::run_list(args, output, &root),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &root),
        Commands::Edit(ref args) => cmd::edit::run_edit(args, output, &root),
        Commands::Convert(ref args) => cmd::convert::run_convert(args, output, &root),
        Commands::Followup(ref args) => cmd::followup::run_followup(args, output, &root),
        Commands::Agenda(ref args) => cmd::agenda::run_agenda(args, output, &root),
        Commands::Notify(ref args) => cmd::notify::run_notify(args, output, &root),
        Commands::Watch(ref args) => cmd::watch::run_watch(args, output, &root),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output, &root),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Command failures arrive here already rendered to stderr;
            // anything else (render I/O failures) still needs a line.
            if err.downcast_ref::<output::Reported>().is_none() {
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
