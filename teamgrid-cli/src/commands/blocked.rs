use anyhow::Result;
use owo_colors::OwoColorize;
use teamgrid_core::store::Store;
use teamgrid_core::week;

use crate::render;
use crate::utils;

pub fn show(store: &Store) -> Result<()> {
    let settings = store.settings();
    println!("{}", "Blocked hours (every week, every player)".bold());
    println!();
    println!("{}", render::render_blocked(&settings)?);
    println!();
    println!(
        "{}",
        "Toggle with: teamgrid blocked toggle <day> <hour>".dimmed()
    );
    Ok(())
}

pub fn toggle(store: &Store, day: u8, hour: u8) -> Result<()> {
    let mut settings = store.settings();
    if !settings.hours()?.contains(&hour) {
        anyhow::bail!(
            "Hour {} is outside the visible range {}..{}",
            hour,
            settings.start_hour,
            settings.end_hour
        );
    }

    let now_blocked = settings.blocked.toggle(day, hour);
    let status = store.set_settings(&settings)?;

    println!(
        "{} {} is now {}",
        week::weekday_label(day)?,
        week::hour_label(hour),
        if now_blocked {
            "blocked".red().to_string()
        } else {
            "open".green().to_string()
        }
    );
    utils::note_push(&status);

    println!();
    println!("{}", render::render_blocked(&settings)?);
    Ok(())
}

pub fn clear(store: &Store) -> Result<()> {
    let mut settings = store.settings();
    settings.blocked.clear();
    let status = store.set_settings(&settings)?;

    println!("Blocked hours cleared");
    utils::note_push(&status);
    Ok(())
}
