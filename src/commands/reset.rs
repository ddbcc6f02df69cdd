//! Tear down megaverse entities declared by the goal grid.

use anyhow::Result;
use dialoguer::Confirm;
use megakit::MapBuilder;

use crate::Context;
use crate::config::Config;
use crate::progress::CellProgress;
use crate::ui;

pub fn run(ctx: &Context, config: &Config, row: Option<usize>, yes: bool) -> Result<()> {
    match row {
        Some(r) => ui::header(&format!("Resetting row {r}")),
        None => ui::header("Resetting the megaverse"),
    }

    if !yes {
        let prompt = match row {
            Some(r) => format!("Delete every goal-map entity in row {r}?"),
            None => "Delete every goal-map entity from the map?".to_string(),
        };
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            ui::warn("Aborted");
            return Ok(());
        }
    }

    let client = super::make_client(config);
    let progress = CellProgress::new(ctx.quiet, ctx.verbose > 0);

    let report = MapBuilder::new(&client).callback(&progress).reset(row)?;
    progress.finish();

    super::summarize(&report, "deleted", report.deleted)
}
