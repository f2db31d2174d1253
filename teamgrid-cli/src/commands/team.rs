use anyhow::Result;
use owo_colors::OwoColorize;
use teamgrid_core::aggregate::{TeamGrid, GOOD_AVAILABILITY_THRESHOLD};
use teamgrid_core::store::Store;
use teamgrid_core::week::WeekKey;

use crate::render::Render;

pub fn run(store: &Store, week: WeekKey) -> Result<()> {
    let roster = store.players();
    let grid = TeamGrid::build(&store.availability(), &roster, &store.settings(), week)?;

    println!("{}", grid.render());
    println!();
    println!(
        "{}",
        format!(
            "Counts are yes+maybe answers out of {} players; {}+ is highlighted. \
            Breakdown: teamgrid cell <day> <hour>",
            roster.len(),
            GOOD_AVAILABILITY_THRESHOLD
        )
        .dimmed()
    );
    Ok(())
}
