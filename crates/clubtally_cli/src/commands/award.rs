//! Award command implementation.

use crate::context::{resolve_event, resolve_member, with_roster, CliResult};
use crate::output;
use clubtally_core::RuntimeConfig;

pub fn run(config: &RuntimeConfig, member: &str, event: Option<&str>) -> CliResult<()> {
    with_roster(&config.db_path, |roster| {
        let member_id = resolve_member(roster, member)?;
        let log = match event {
            Some(raw) => {
                let event_id = resolve_event(roster, raw)?;
                roster.award_point(member_id, event_id)?
            }
            None => roster.award_point_to_selected(member_id)?,
        };
        let log = log.ok_or_else(|| format!("member {member_id} disappeared"))?;
        let total = roster.member(member_id).map(|m| m.points).unwrap_or_default();
        println!(
            "{} {:+} {} (total {total}) at {}",
            member_id,
            log.points,
            log.event_name,
            output::format_timestamp(log.created_at_ms)
        );
        Ok(())
    })
}
