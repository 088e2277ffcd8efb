//! History commands.

use crate::context::{resolve_member, with_roster, CliResult};
use crate::output;
use clap::Subcommand;
use clubtally_core::RuntimeConfig;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Show a member's history, newest first
    Show {
        /// Member id (or unique id prefix)
        member: String,
    },
    /// Delete history entries by the indices shown in `history show`
    Delete {
        /// Member id (or unique id prefix)
        member: String,
        /// Entry indices
        #[arg(required = true, num_args = 1..)]
        indices: Vec<usize>,
    },
}

pub fn run(config: &RuntimeConfig, action: HistoryAction) -> CliResult<()> {
    with_roster(&config.db_path, |roster| match action {
        HistoryAction::Show { member } => {
            let id = resolve_member(roster, &member)?;
            let member = roster
                .member(id)
                .ok_or_else(|| format!("member {id} disappeared"))?;
            output::print_history(member);
            Ok(())
        }
        HistoryAction::Delete { member, indices } => {
            let id = resolve_member(roster, &member)?;
            let total = roster
                .delete_history_entries(id, &indices)?
                .ok_or_else(|| format!("member {id} disappeared"))?;
            println!("history updated for {id} (total {total})");
            Ok(())
        }
    })
}
