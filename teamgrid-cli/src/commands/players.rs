use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use teamgrid_core::config::TeamGridConfig;
use teamgrid_core::player::PlayerId;
use teamgrid_core::store::Store;

use crate::utils;

pub fn list(store: &Store) -> Result<()> {
    let roster = store.players();
    if roster.is_empty() {
        println!(
            "No players yet. Add one with:\n  teamgrid players add <name>"
        );
        return Ok(());
    }

    for player in roster.players() {
        println!("{}  {}", player.name, player.id.to_string().dimmed());
    }
    Ok(())
}

pub fn add(store: &Store, config: &mut TeamGridConfig, name: &str) -> Result<()> {
    let mut roster = store.players();
    let id = roster.add(name);
    let status = store.set_players(&roster)?;

    println!("Added {} {}", name.trim().bold(), id.to_string().dimmed());
    if config.set_default_player_if_unset(name.trim())? {
        println!(
            "{}",
            format!("{} is now your default player", name.trim()).dimmed()
        );
    }
    utils::note_push(&status);
    Ok(())
}

pub fn rename(store: &Store, id: &str, name: &str) -> Result<()> {
    let mut roster = store.players();
    roster.rename(&PlayerId(id.to_string()), name)?;
    let status = store.set_players(&roster)?;

    println!("Renamed {} to {}", id.dimmed(), name.bold());
    utils::note_push(&status);
    Ok(())
}

pub fn remove(store: &Store, id: &str) -> Result<()> {
    let mut roster = store.players();
    let id = PlayerId(id.to_string());
    let Some(player) = roster.get(&id).cloned() else {
        anyhow::bail!("Player not found: {}", id);
    };

    let confirmed = Confirm::new()
        .with_prompt(format!("Remove {} from the roster?", player.name))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Cancelled");
        return Ok(());
    }

    roster.remove(&id)?;
    let status = store.set_players(&roster)?;

    // Their recorded availability stays in the store, just no longer counted
    println!("Removed {}", player.name.bold());
    utils::note_push(&status);
    Ok(())
}
