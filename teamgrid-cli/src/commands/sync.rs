use std::collections::BTreeMap;

use anyhow::Result;
use owo_colors::OwoColorize;
use teamgrid_core::aggregate::TeamGrid;
use teamgrid_core::error::TeamGridError;
use teamgrid_core::store::Store;
use teamgrid_core::sync::{self, DirRemote, SnapshotKind};
use teamgrid_core::week::WeekKey;

use crate::render::Render;
use crate::utils;

fn require_remote(store: &Store) -> Result<&DirRemote> {
    store.remote().ok_or_else(|| {
        anyhow::anyhow!(
            "No sync remote configured.\n\n\
            Point teamgrid at a directory all devices can see by setting\n  \
            remote_dir = \"~/Sync/teamgrid\"\n\
            in ~/.config/teamgrid/config.toml"
        )
    })
}

pub fn status(store: &Store) -> Result<()> {
    let Some(remote) = store.remote() else {
        println!("{}", "Sync: not configured (local-only)".dimmed());
        return Ok(());
    };

    println!("Remote: {}", remote.dir().display());
    for kind in SnapshotKind::ALL {
        match remote.fetch(kind) {
            Ok(Some(snapshot)) => println!(
                "  {:<14} updated {}",
                kind.name(),
                snapshot.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Ok(None) => println!("  {:<14} {}", kind.name(), "missing".dimmed()),
            Err(e) => println!("  {:<14} {}", kind.name(), e.to_string().red()),
        }
    }
    Ok(())
}

/// Upload every local collection as a whole-document snapshot.
pub fn push(store: &Store) -> Result<()> {
    let remote = require_remote(store)?;

    let spinner = utils::create_spinner("Pushing snapshots".to_string());
    for kind in SnapshotKind::ALL {
        remote.push(kind, store.snapshot_payload(kind)?)?;
    }
    spinner.finish_and_clear();

    println!("Pushed {} snapshots to {}", SnapshotKind::ALL.len(), remote.dir().display());
    Ok(())
}

/// Replace local collections with the remote snapshots, seeding the remote
/// with anything it lacks, then re-render the team view.
pub fn pull(store: &Store, week: WeekKey) -> Result<()> {
    let remote = require_remote(store)?;

    let spinner = utils::create_spinner("Pulling snapshots".to_string());
    let seeded = sync::seed_if_missing(store, remote)?;
    let applied = sync::pull(store, remote)?;
    spinner.finish_and_clear();

    if !seeded.is_empty() {
        println!("Seeded remote: {}", kind_names(&seeded));
    }
    println!("Applied: {}", kind_names(&applied));

    render_after_apply(store, week)?;
    Ok(())
}

/// Poll the remote and apply any changed snapshot until interrupted.
pub async fn watch(store: &Store, week: WeekKey, interval_secs: u64) -> Result<()> {
    let remote = require_remote(store)?;
    println!(
        "Watching {} every {}s (Ctrl-C to stop)",
        remote.dir().display(),
        interval_secs
    );

    let mut seen: BTreeMap<SnapshotKind, chrono::DateTime<chrono::Utc>> = BTreeMap::new();
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs));

    loop {
        interval.tick().await;
        match sync::pull_newer(store, remote, &mut seen) {
            Ok(applied) if applied.is_empty() => {}
            Ok(applied) => {
                println!();
                println!("Applied: {}", kind_names(&applied));
                render_after_apply(store, week)?;
            }
            // Remote trouble degrades to local-only; keep watching
            Err(TeamGridError::Io(e)) => {
                println!("{}", format!("remote unavailable: {}", e).dimmed());
            }
            Err(e) => {
                println!("{}", e.to_string().red());
            }
        }
    }
}

fn kind_names(kinds: &[SnapshotKind]) -> String {
    if kinds.is_empty() {
        return "nothing".to_string();
    }
    kinds
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A remote replacement is treated like a fresh load: re-render
/// unconditionally.
fn render_after_apply(store: &Store, week: WeekKey) -> Result<()> {
    let grid = TeamGrid::build(&store.availability(), &store.players(), &store.settings(), week)?;
    println!();
    println!("{}", grid.render());
    Ok(())
}
