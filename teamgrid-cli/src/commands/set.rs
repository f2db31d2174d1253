use anyhow::Result;
use owo_colors::OwoColorize;
use teamgrid_core::aggregate::TeamGrid;
use teamgrid_core::config::TeamGridConfig;
use teamgrid_core::grid::{self, PersonalGrid};
use teamgrid_core::store::Store;
use teamgrid_core::week::{self, WeekKey};

use crate::render::{state_marker, Render};
use crate::utils;

pub fn run(
    store: &Store,
    config: &TeamGridConfig,
    player: Option<&str>,
    week: WeekKey,
    day: u8,
    hour: u8,
    force_no: bool,
) -> Result<()> {
    let roster = store.players();
    let player = utils::resolve_player(&roster, config, player)?.clone();
    let settings = store.settings();

    let mut availability = store.availability();
    let state = grid::apply_edit(
        &mut availability,
        &settings,
        &player.id,
        week,
        day,
        hour,
        force_no,
    )?;
    let status = store.set_availability(&availability)?;

    println!(
        "{} {} {} → {} {:?}",
        week::weekday_label(day)?.bold(),
        week.day_date(day).format("%Y-%m-%d"),
        week::hour_label(hour),
        state_marker(state),
        state
    );
    utils::note_push(&status);

    // An edit is immediately visible in both views
    println!();
    println!("{}", PersonalGrid::build(&availability, &settings, &player.id, week)?.render());
    println!();
    println!("{}", "Team availability:".bold());
    println!("{}", TeamGrid::build(&availability, &roster, &settings, week)?.render());
    Ok(())
}
