//! Reset command implementation.

use crate::context::{with_roster, CliResult};
use clubtally_core::RuntimeConfig;

pub fn run(config: &RuntimeConfig, yes: bool) -> CliResult<()> {
    if !yes {
        return Err("refusing to reset all points without --yes".into());
    }
    with_roster(&config.db_path, |roster| {
        roster.reset_all()?;
        println!("reset {} members", roster.members().len());
        Ok(())
    })
}
