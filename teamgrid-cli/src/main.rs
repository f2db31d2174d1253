mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use teamgrid_core::config::TeamGridConfig;

#[derive(Parser)]
#[command(name = "teamgrid")]
#[command(about = "Edit your weekly availability and see your team's aggregated schedule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one player's availability grid for a week
    Week {
        /// Player to show (defaults to the configured player, then the first
        /// roster entry)
        #[arg(short, long)]
        player: Option<String>,

        /// View the week containing this date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Move the viewed week by this many weeks
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },
    /// Edit one slot: each call cycles empty -> yes -> maybe -> no
    Set {
        /// Day: mon..sun or 0..6
        day: String,

        /// Hour of day (within the visible range)
        hour: u8,

        /// Jump straight to "can't make it" instead of cycling
        #[arg(long)]
        no: bool,

        #[arg(short, long)]
        player: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },
    /// Team availability counts for a week
    Team {
        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },
    /// Who answered what for one cell
    Cell {
        /// Day: mon..sun or 0..6
        day: String,

        /// Hour of day
        hour: u8,

        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },
    /// Show or edit the weekly blocked-hours mask
    Blocked {
        #[command(subcommand)]
        action: Option<BlockedAction>,
    },
    /// Roster management
    Players {
        #[command(subcommand)]
        action: Option<PlayersAction>,
    },
    /// Show settings, or change them with the hours/name subcommands
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Sync snapshots with the shared remote directory
    Sync {
        #[command(subcommand)]
        action: Option<SyncAction>,
    },
}

#[derive(Subcommand)]
enum BlockedAction {
    /// Flip one cell of the mask
    Toggle { day: String, hour: u8 },
    /// Unblock everything
    Clear,
}

#[derive(Subcommand)]
enum PlayersAction {
    Add { name: String },
    Rename { id: String, name: String },
    Remove { id: String },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Set the visible hour range (start inclusive, end exclusive)
    Hours { start: u8, end: u8 },
    /// Set your display name (never synced)
    Name { name: String },
}

#[derive(Subcommand)]
enum SyncAction {
    /// Upload all local collections
    Push,
    /// Apply all remote snapshots, seeding missing ones
    Pull,
    /// Keep applying remote changes until interrupted
    Watch {
        #[arg(long, default_value_t = 10)]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = TeamGridConfig::load()?;
    let store = config.open_store();

    match cli.command {
        Commands::Week { player, date, offset } => {
            let week = utils::viewed_week(date.as_deref(), offset)?;
            commands::week::run(&store, &config, player.as_deref(), week)
        }
        Commands::Set { day, hour, no, player, date, offset } => {
            let week = utils::viewed_week(date.as_deref(), offset)?;
            let day = utils::parse_day(&day)?;
            commands::set::run(&store, &config, player.as_deref(), week, day, hour, no)
        }
        Commands::Team { date, offset } => {
            let week = utils::viewed_week(date.as_deref(), offset)?;
            commands::team::run(&store, week)
        }
        Commands::Cell { day, hour, date, offset } => {
            let week = utils::viewed_week(date.as_deref(), offset)?;
            let day = utils::parse_day(&day)?;
            commands::cell::run(&store, week, day, hour)
        }
        Commands::Blocked { action } => match action {
            None => commands::blocked::show(&store),
            Some(BlockedAction::Toggle { day, hour }) => {
                let day = utils::parse_day(&day)?;
                commands::blocked::toggle(&store, day, hour)
            }
            Some(BlockedAction::Clear) => commands::blocked::clear(&store),
        },
        Commands::Players { action } => match action {
            None => commands::players::list(&store),
            Some(PlayersAction::Add { name }) => {
                commands::players::add(&store, &mut config, &name)
            }
            Some(PlayersAction::Rename { id, name }) => {
                commands::players::rename(&store, &id, &name)
            }
            Some(PlayersAction::Remove { id }) => commands::players::remove(&store, &id),
        },
        Commands::Settings { action } => match action {
            None => commands::settings::show(&store),
            Some(SettingsAction::Hours { start, end }) => {
                commands::settings::set_hours(&store, start, end)
            }
            Some(SettingsAction::Name { name }) => commands::settings::set_name(&store, &name),
        },
        Commands::Sync { action } => {
            let week = utils::viewed_week(None, 0)?;
            match action {
                None => commands::sync::status(&store),
                Some(SyncAction::Push) => commands::sync::push(&store),
                Some(SyncAction::Pull) => commands::sync::pull(&store, week),
                Some(SyncAction::Watch { interval }) => {
                    commands::sync::watch(&store, week, interval).await
                }
            }
        }
    }
}
