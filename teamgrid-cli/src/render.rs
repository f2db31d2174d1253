//! Terminal rendering for teamgrid types.
//!
//! Extension traits that turn rendering-ready grids from teamgrid-core into
//! colored terminal output using owo_colors.

use owo_colors::OwoColorize;
use teamgrid_core::aggregate::{CellSelection, TeamCell, TeamGrid};
use teamgrid_core::error::TeamGridResult;
use teamgrid_core::grid::{PersonalCell, PersonalGrid};
use teamgrid_core::settings::Settings;
use teamgrid_core::slot::SlotState;
use teamgrid_core::week::{self, WeekKey, WEEKDAY_LABELS};

const CELL_WIDTH: usize = 8;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Marker for a slot state, as shown on the personal grid.
pub fn state_marker(state: SlotState) -> &'static str {
    match state {
        SlotState::Empty => "·",
        SlotState::Yes => "✓",
        SlotState::Maybe => "?",
        SlotState::No => "×",
    }
}

fn colorize_state(state: SlotState, cell: &str) -> String {
    match state {
        SlotState::Empty => cell.dimmed().to_string(),
        SlotState::Yes => cell.green().to_string(),
        SlotState::Maybe => cell.yellow().to_string(),
        SlotState::No => cell.red().to_string(),
    }
}

/// "Week 2026-08-24 → 2026-08-30"
pub fn week_label(week: WeekKey) -> String {
    format!(
        "{} {} → {}",
        "Week".bold(),
        week,
        week.sunday().format("%Y-%m-%d")
    )
}

/// Column headers: "Mon 24  Tue 25  ..." with the day of month.
fn header_row(week: WeekKey) -> String {
    let mut line = String::from("      ");
    for day in 0..7u8 {
        let label = format!("{} {}", WEEKDAY_LABELS[day as usize], week.day_date(day).format("%d"));
        line.push_str(&format!("{:^CELL_WIDTH$}", label));
    }
    line.trim_end().to_string()
}

fn row_head(hour: u8) -> String {
    format!("{:<6}", week::hour_label(hour))
}

impl Render for PersonalGrid {
    fn render(&self) -> String {
        let mut lines = vec![week_label(self.week), String::new(), header_row(self.week)];

        for (hour, row) in self.rows() {
            let mut line = row_head(hour);
            for cell in row {
                let padded = |m: &str| format!("{:^CELL_WIDTH$}", m);
                let rendered = match cell {
                    PersonalCell::Blocked => padded("#").dimmed().to_string(),
                    PersonalCell::Open(state) => colorize_state(*state, &padded(state_marker(*state))),
                };
                line.push_str(&rendered);
            }
            lines.push(line.trim_end().to_string());
        }

        lines.push(String::new());
        lines.push(
            format!(
                "{} yes   {} maybe   {} no   {} unanswered   {} blocked",
                "✓".green(),
                "?".yellow(),
                "×".red(),
                "·".dimmed(),
                "#".dimmed()
            ),
        );
        lines.join("\n")
    }
}

impl Render for TeamGrid {
    fn render(&self) -> String {
        let mut lines = vec![week_label(self.week), String::new(), header_row(self.week)];

        for (hour, row) in self.rows() {
            let mut line = row_head(hour);
            for cell in row {
                let rendered = match cell {
                    TeamCell::Blocked => {
                        format!("{:^CELL_WIDTH$}", "#").dimmed().to_string()
                    }
                    TeamCell::Open { count, good } => {
                        let padded = format!("{:^CELL_WIDTH$}", count);
                        if *good {
                            padded.green().bold().to_string()
                        } else if *count == 0 {
                            padded.dimmed().to_string()
                        } else {
                            padded
                        }
                    }
                };
                line.push_str(&rendered);
            }
            lines.push(line.trim_end().to_string());
        }

        lines.join("\n")
    }
}

impl Render for CellSelection {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "{} {} · {}",
            self.weekday.bold(),
            self.date.format("%Y-%m-%d"),
            week::hour_label(self.hour)
        )];

        let yes_names = join_or_dash(&self.detail.yes);
        let maybe_names = join_or_dash(&self.detail.maybe);
        lines.push(format!(
            "  {} ({}): {}",
            "Yes".green(),
            self.detail.yes.len(),
            yes_names
        ));
        lines.push(format!(
            "  {} ({}): {}",
            "Maybe".yellow(),
            self.detail.maybe.len(),
            maybe_names
        ));
        lines.push(format!(
            "  {}: {}",
            "Not available".red(),
            self.detail.no_count
        ));
        lines.push(format!(
            "  Count: {} {}",
            self.detail.count(),
            if self.detail.is_good() {
                "(good availability)".green().to_string()
            } else {
                String::new()
            }
        ));
        lines.join("\n")
    }
}

fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "-".dimmed().to_string()
    } else {
        names.join(", ")
    }
}

/// The blocked-hours editor grid (week-independent, so no date headers).
pub fn render_blocked(settings: &Settings) -> TeamGridResult<String> {
    let mut header = String::from("      ");
    for label in WEEKDAY_LABELS {
        header.push_str(&format!("{:^CELL_WIDTH$}", label));
    }
    let mut lines = vec![header.trim_end().to_string()];

    for hour in settings.hours()? {
        let mut line = row_head(hour);
        for day in 0..7u8 {
            let marker = if settings.blocked.is_blocked(day, hour) { "⛔" } else { "·" };
            let padded = format!("{:^CELL_WIDTH$}", marker);
            if settings.blocked.is_blocked(day, hour) {
                line.push_str(&padded);
            } else {
                line.push_str(&padded.dimmed().to_string());
            }
        }
        lines.push(line.trim_end().to_string());
    }

    Ok(lines.join("\n"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_markers_are_distinct() {
        let markers = [
            state_marker(SlotState::Empty),
            state_marker(SlotState::Yes),
            state_marker(SlotState::Maybe),
            state_marker(SlotState::No),
        ];
        for (i, a) in markers.iter().enumerate() {
            for b in &markers[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_week_label_spans_monday_to_sunday() {
        let week = WeekKey::containing(chrono::NaiveDate::from_ymd_opt(2026, 8, 26).unwrap());
        let label = week_label(week);
        assert!(label.contains("2026-08-24"));
        assert!(label.contains("2026-08-30"));
    }
}
