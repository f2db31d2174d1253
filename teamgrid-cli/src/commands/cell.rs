use anyhow::Result;
use teamgrid_core::aggregate;
use teamgrid_core::store::Store;
use teamgrid_core::week::WeekKey;

use crate::render::Render;

pub fn run(store: &Store, week: WeekKey, day: u8, hour: u8) -> Result<()> {
    // Computed fresh from the store on every call, never cached
    let selection = aggregate::select_cell(
        &store.availability(),
        &store.players(),
        &store.settings(),
        week,
        day,
        hour,
    )?;
    println!("{}", selection.render());
    Ok(())
}
