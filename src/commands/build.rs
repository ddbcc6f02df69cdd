//! Build the megaverse map from its goal grid.

use anyhow::Result;
use megakit::MapBuilder;

use crate::Context;
use crate::config::Config;
use crate::progress::CellProgress;
use crate::ui;

pub fn run(ctx: &Context, config: &Config, row: Option<usize>) -> Result<()> {
    match row {
        Some(r) => ui::header(&format!("Building row {r}")),
        None => ui::header("Building the megaverse"),
    }
    ui::dim(&format!("goal: {}", config.base_url));

    let client = super::make_client(config);
    let progress = CellProgress::new(ctx.quiet, ctx.verbose > 0);

    let report = MapBuilder::new(&client).callback(&progress).build(row)?;
    progress.finish();

    super::summarize(&report, "created", report.created)
}
