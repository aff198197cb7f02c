mod commands;
mod logging;
mod render;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use cutecal_core::config::AppConfig;
use cutecal_core::settings::DefaultView;

#[derive(Parser)]
#[command(name = "cutecal")]
#[command(about = "Keep track of the people and events you want to be reminded about")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month page
    Month {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month, 1-12 (defaults to the current month)
        #[arg(short, long, allow_negative_numbers = true)]
        month: Option<i32>,
    },
    /// Show the week containing a date
    Week {
        /// Any day of the week (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show a single day
    Day {
        /// The day to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// List all events in chronological order
    Events,
    /// Create a new event (prompts for anything missing)
    New {
        title: Option<String>,

        /// Start date/time (e.g., "tomorrow 3pm", "march 20")
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time
        #[arg(short, long)]
        end: Option<String>,

        /// Name of the contact this event is about
        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// How long before the event to remind (e.g., "30m", "1h")
        #[arg(short, long)]
        reminder: Option<String>,

        /// Mark the event as lasting all day
        #[arg(long)]
        all_day: bool,
    },
    /// Show the details of an event
    Show { id: String },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Delete all events and settings
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show config and data paths
    Config,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Month { .. } => "month",
            Commands::Week { .. } => "week",
            Commands::Day { .. } => "day",
            Commands::Events => "events",
            Commands::New { .. } => "new",
            Commands::Show { .. } => "show",
            Commands::Delete { .. } => "delete",
            Commands::Settings { .. } => "settings",
            Commands::Reset { .. } => "reset",
            Commands::Config => "config",
        }
    }
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Change one setting, e.g. `cutecal settings set startDayOfWeek 1`
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    let _logger = logging::init(&config.log_level, cli.verbose)?;

    let mut storage = config.storage();
    storage.initialize_if_needed()?;

    let today = Local::now().date_naive();

    let command = match cli.command {
        Some(command) => command,
        None => match storage.settings()?.default_view {
            DefaultView::Month => Commands::Month { year: None, month: None },
            DefaultView::Week => Commands::Week { date: None },
            DefaultView::Day => Commands::Day { date: None },
        },
    };
    log::debug!("Running {} (today is {})", command.name(), today);

    match command {
        Commands::Month { year, month } => commands::month::run(&storage, year, month, today),
        Commands::Week { date } => commands::week::run(&storage, date.unwrap_or(today), today),
        Commands::Day { date } => commands::day::run(&storage, date.unwrap_or(today)),
        Commands::Events => commands::events::run(&storage, today),
        Commands::New {
            title,
            start,
            end,
            contact,
            phone,
            email,
            location,
            reminder,
            all_day,
        } => commands::new::run(
            &mut storage,
            commands::new::NewEvent {
                title,
                start,
                end,
                contact,
                phone,
                email,
                location,
                reminder,
                all_day,
            },
        ),
        Commands::Show { id } => commands::show::run(&storage, &id),
        Commands::Delete { id, force } => commands::delete::run(&mut storage, &id, force),
        Commands::Settings { action } => match action {
            None => commands::settings::show(&storage),
            Some(SettingsAction::Set { key, value }) => {
                commands::settings::set(&mut storage, &key, &value)
            }
        },
        Commands::Reset { force } => commands::reset::run(&mut storage, force),
        Commands::Config => commands::config::run(&config),
    }
}
