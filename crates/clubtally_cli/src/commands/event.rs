//! Event commands.

use crate::context::{resolve_event, with_roster, CliResult};
use crate::output;
use clap::Subcommand;
use clubtally_core::{RuntimeConfig, DEFAULT_GLYPH};

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event
    Add {
        /// Display name
        name: String,
        /// Integer points per award; may be zero or negative
        #[arg(allow_hyphen_values = true)]
        points: String,
        /// Symbol shown next to the event
        #[arg(long, default_value = DEFAULT_GLYPH)]
        glyph: String,
    },
    /// Remove an event; existing history is kept
    Remove {
        /// Event id (or unique id prefix)
        id: String,
    },
    /// List events; `*` marks the default award target
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(config: &RuntimeConfig, action: EventAction) -> CliResult<()> {
    with_roster(&config.db_path, |roster| match action {
        EventAction::Add {
            name,
            points,
            glyph,
        } => {
            let id = roster.add_event(&name, &points, &glyph)?;
            println!("{id}");
            Ok(())
        }
        EventAction::Remove { id } => {
            let id = resolve_event(roster, &id)?;
            roster.delete_event(id)?;
            println!("removed {id}");
            Ok(())
        }
        EventAction::List { json } => {
            let selected = roster.selected_event().map(|event| event.id);
            if json {
                let rows = roster
                    .events()
                    .iter()
                    .map(|event| output::event_json(event, Some(event.id) == selected))
                    .collect::<Vec<_>>();
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            output::print_event_header();
            for event in roster.events() {
                println!("{}", output::format_event_row(event, Some(event.id) == selected));
            }
            Ok(())
        }
    })
}
