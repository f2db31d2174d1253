use anyhow::Result;
use owo_colors::OwoColorize;
use teamgrid_core::store::Store;

use crate::utils;

pub fn show(store: &Store) -> Result<()> {
    let settings = store.settings();
    println!("Name:  {}", settings.my_name.bold());
    println!(
        "Hours: {:02}:00 → {:02}:00",
        settings.start_hour, settings.end_hour
    );
    println!(
        "Blocked cells: {}",
        settings.blocked.iter().count()
    );
    Ok(())
}

/// Change the visible hour range. Existing answers outside the new range are
/// kept in the store and simply become unreachable until the range widens.
pub fn set_hours(store: &Store, start: u8, end: u8) -> Result<()> {
    let mut settings = store.settings();
    settings.start_hour = start;
    settings.end_hour = end;

    let status = store.set_settings(&settings)?;
    println!("Hours set to {:02}:00 → {:02}:00", start, end);
    utils::note_push(&status);
    Ok(())
}

pub fn set_name(store: &Store, name: &str) -> Result<()> {
    let mut settings = store.settings();
    settings.my_name = name.trim().to_string();

    let status = store.set_settings(&settings)?;
    println!("Name set to {}", settings.my_name.bold());
    utils::note_push(&status);
    Ok(())
}
