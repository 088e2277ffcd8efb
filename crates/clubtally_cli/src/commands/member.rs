//! Member commands.

use crate::context::{resolve_member, with_roster, CliResult};
use crate::output;
use clap::Subcommand;
use clubtally_core::RuntimeConfig;

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a member with zero points
    Add {
        /// Display name
        name: String,
    },
    /// Remove a member and their history
    Remove {
        /// Member id (or unique id prefix)
        id: String,
        /// Confirm the removal
        #[arg(long)]
        yes: bool,
    },
    /// List members in ranking order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(config: &RuntimeConfig, action: MemberAction) -> CliResult<()> {
    with_roster(&config.db_path, |roster| match action {
        MemberAction::Add { name } => {
            let id = roster.add_member(&name)?;
            println!("{id}");
            Ok(())
        }
        MemberAction::Remove { id, yes } => {
            let id = resolve_member(roster, &id)?;
            if !yes {
                return Err("refusing to remove member without --yes".into());
            }
            roster.delete_member(id)?;
            println!("removed {id}");
            Ok(())
        }
        MemberAction::List { json } => {
            let ranked = roster.ranked_members();
            if json {
                let rows = ranked.iter().map(|e| output::ranked_json(&e)).collect::<Vec<_>>();
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            output::print_member_header();
            for entry in &ranked {
                println!("{}", output::format_ranked_row(&entry));
            }
            Ok(())
        }
    })
}
