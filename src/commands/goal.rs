//! Fetch and display the goal map.

use anyhow::{Context as _, Result};
use colored::{ColoredString, Colorize};
use megakit::{Entity, classify};

use crate::config::Config;
use crate::ui;

pub fn run(config: &Config) -> Result<()> {
    let client = super::make_client(config);
    let goal = client.goal_map().context("could not fetch the goal map")?;

    ui::header("Goal map");
    for row in goal.rows() {
        let line: String = row
            .iter()
            .map(|label| format!("{} ", glyph(label)))
            .collect();
        println!("  {line}");
    }
    println!();
    ui::dim(&format!(
        "{} rows x {} columns ({} cells)",
        goal.row_count(),
        goal.column_count(),
        goal.cell_count()
    ));
    Ok(())
}

/// One display glyph per goal-map cell.
fn glyph(label: &str) -> ColoredString {
    match classify(label) {
        Ok(None) => "·".dimmed(),
        Ok(Some(Entity::Polyanet)) => "P".magenta(),
        Ok(Some(Entity::Soloon { color })) => match color.as_str() {
            "red" => "S".red(),
            "blue" => "S".blue(),
            "purple" => "S".purple(),
            "white" => "S".bright_white(),
            _ => "S".normal(),
        },
        Ok(Some(Entity::Cometh { .. })) => "C".cyan(),
        Err(_) => "?".red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_characters() {
        assert!(glyph("SPACE").to_string().contains('·'));
        assert!(glyph("POLYANET").to_string().contains('P'));
        assert!(glyph("BLUE_SOLOON").to_string().contains('S'));
        assert!(glyph("UP_COMETH").to_string().contains('C'));
        assert!(glyph("GLORB").to_string().contains('?'));
    }
}
