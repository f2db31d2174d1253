//! Shared CLI helpers: argument parsing, player resolution, spinners.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use teamgrid_core::config::TeamGridConfig;
use teamgrid_core::player::{Player, Roster};
use teamgrid_core::store::PushStatus;
use teamgrid_core::week::WeekKey;

/// Parse a day argument: a weekday name (mon..sun, case-insensitive) or an
/// index 0..6.
pub fn parse_day(s: &str) -> Result<u8> {
    let day = match s.to_ascii_lowercase().as_str() {
        "mon" | "monday" => 0,
        "tue" | "tuesday" => 1,
        "wed" | "wednesday" => 2,
        "thu" | "thursday" => 3,
        "fri" | "friday" => 4,
        "sat" | "saturday" => 5,
        "sun" | "sunday" => 6,
        other => match other.parse::<u8>() {
            Ok(n) if n < 7 => n,
            _ => anyhow::bail!(
                "Invalid day '{}'. Expected mon..sun or an index 0..6",
                s
            ),
        },
    };
    Ok(day)
}

/// Resolve the viewed week from --date / --offset. Navigation operates on
/// the viewed date; the week key is re-derived here so the displayed week
/// always re-aligns to a Monday boundary.
pub fn viewed_week(date: Option<&str>, offset: i64) -> Result<WeekKey> {
    let viewed = match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", s))?,
        None => chrono::Local::now().date_naive(),
    };
    Ok(WeekKey::containing(viewed + Duration::days(7 * offset)))
}

/// Pick the player a personal command operates on: the --player flag, then
/// the configured default, then the first roster entry.
pub fn resolve_player<'a>(
    roster: &'a Roster,
    config: &TeamGridConfig,
    flag: Option<&str>,
) -> Result<&'a Player> {
    if roster.is_empty() {
        anyhow::bail!(
            "No players yet.\n\n\
            Add your first player with:\n  \
            teamgrid players add <name>"
        );
    }

    let wanted = flag.or(config.player.as_deref());
    match wanted {
        Some(name) => roster.find_by_name(name).ok_or_else(|| {
            let available: Vec<_> =
                roster.players().iter().map(|p| p.name.as_str()).collect();
            anyhow::anyhow!(
                "Player '{}' not found. Available: {}",
                name,
                available.join(", ")
            )
        }),
        None => Ok(&roster.players()[0]),
    }
}

/// Print a dimmed note about what happened on the remote after a write.
pub fn note_push(status: &PushStatus) {
    match status {
        PushStatus::Pushed(kind) => {
            println!("{}", format!("synced {}", kind.name()).dimmed());
        }
        PushStatus::LocalOnly => {}
        PushStatus::Failed(e) => {
            println!(
                "{}",
                format!("saved locally; sync failed: {}", e).yellow()
            );
        }
    }
}

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

// =============================================================================
// Tests
// =============================================================================
