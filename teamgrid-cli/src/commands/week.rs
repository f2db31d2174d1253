use anyhow::Result;
use owo_colors::OwoColorize;
use teamgrid_core::config::TeamGridConfig;
use teamgrid_core::grid::PersonalGrid;
use teamgrid_core::store::Store;
use teamgrid_core::week::WeekKey;

use crate::render::Render;
use crate::utils;

pub fn run(
    store: &Store,
    config: &TeamGridConfig,
    player: Option<&str>,
    week: WeekKey,
) -> Result<()> {
    let roster = store.players();
    let player = utils::resolve_player(&roster, config, player)?;

    let grid = PersonalGrid::build(&store.availability(), &store.settings(), &player.id, week)?;

    println!("{}", player.name.bold());
    println!("{}", grid.render());
    println!();
    println!(
        "{}",
        "Edit with: teamgrid set <day> <hour> (add --no for \"can't make it\")".dimmed()
    );
    Ok(())
}
