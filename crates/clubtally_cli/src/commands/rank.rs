//! Leaderboard and export commands.

use crate::context::{with_roster, CliResult};
use crate::output;
use clubtally_core::{write_ranking_file, HeaderStyle, RuntimeConfig};
use std::path::PathBuf;

pub fn run(config: &RuntimeConfig, json: bool) -> CliResult<()> {
    with_roster(&config.db_path, |roster| {
        let ranked = roster.ranked_members();
        if json {
            let rows = ranked.iter().map(|e| output::ranked_json(&e)).collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }
        if ranked.is_empty() {
            println!("no members yet");
            return Ok(());
        }
        for entry in &ranked {
            println!(
                "{:<4} {}  {} pts",
                entry.badge(),
                entry.member.name,
                entry.member.points
            );
        }
        Ok(())
    })
}

pub fn export(config: &RuntimeConfig, dir: Option<PathBuf>, header: &str) -> CliResult<()> {
    let header = HeaderStyle::parse(header)
        .ok_or_else(|| format!("unknown header style `{header}`; expected legacy|english"))?;
    let dir = dir.unwrap_or_else(|| config.export_dir.clone());
    with_roster(&config.db_path, |roster| {
        let path = write_ranking_file(&dir, &roster.ranked_members(), header)?;
        println!("{}", path.display());
        Ok(())
    })
}
