use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::{RunAggregate, RunOutcome, RunRecord};

#[derive(Serialize)]
struct JsonReport<'a> {
    runs: &'a [RunRecord],
    aggregates: &'a [RunAggregate],
}

pub fn generate_console_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[RunRecord],
    aggregates: &[RunAggregate],
    total_duration: Duration,
    verbose: bool,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Simulation Summary".bright_cyan().bold())?;
    writeln!(writer, "{}", "=====================".cyan())?;
    writeln!(writer, "Total runs: {}", records.len())?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    writeln!(writer)?;

    for aggregate in aggregates {
        writeln!(
            writer,
            "{} on {}",
            aggregate.strategy.label().bold(),
            aggregate.difficulty
        )?;
        writeln!(
            writer,
            "   Runs: {}  Victories: {}  Defeats: {}  Exits: {}  Stalls: {}",
            aggregate.runs,
            aggregate.victories.to_string().green(),
            aggregate.defeats.to_string().red(),
            aggregate.exits,
            aggregate.stalls.to_string().yellow()
        )?;
        writeln!(
            writer,
            "   Win rate: {:.1}%  Turns: {:.1} ± {:.1}  Towns: {:.1}  Final gold: {:.1}",
            aggregate.win_rate * 100.0,
            aggregate.mean_turns,
            aggregate.std_turns,
            aggregate.mean_towns,
            aggregate.mean_final_gold
        )?;
        writeln!(writer)?;
    }

    if verbose {
        writeln!(writer, "{}", "🎲 Individual Runs".bright_yellow().bold())?;
        writeln!(writer, "{}", "==================".yellow())?;
        for record in records {
            let status = match record.outcome {
                RunOutcome::Victory => "✅",
                RunOutcome::Defeat => "💀",
                RunOutcome::PlayerExit => "🚪",
                RunOutcome::Stalled => "⏳",
            };
            writeln!(
                writer,
                "{status} [{} {} seed {}] {} after {} turns, {} towns, {} gold",
                record.strategy,
                record.difficulty,
                record.seed,
                record.outcome,
                record.turns,
                record.towns_visited,
                record.final_gold
            )?;
        }
    }
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[RunRecord],
    aggregates: &[RunAggregate],
) -> Result<()> {
    let report = JsonReport {
        runs: records,
        aggregates,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[RunRecord],
    aggregates: &[RunAggregate],
) -> Result<()> {
    writeln!(writer, "# Treasure Hunter Simulation Results\n")?;
    writeln!(writer, "- **Total runs**: {}\n", records.len())?;
    if aggregates.is_empty() {
        writeln!(writer, "_No runs executed._")?;
        return Ok(());
    }

    writeln!(writer, "## Summary\n")?;
    writeln!(
        writer,
        "| Strategy | Difficulty | Runs | Victories | Defeats | Exits | Stalls | Win rate | Mean turns |"
    )?;
    writeln!(writer, "|---|---|---|---|---|---|---|---|---|")?;
    for aggregate in aggregates {
        writeln!(
            writer,
            "| {} | {} | {} | {} | {} | {} | {} | {:.1}% | {:.1} |",
            aggregate.strategy,
            aggregate.difficulty,
            aggregate.runs,
            aggregate.victories,
            aggregate.defeats,
            aggregate.exits,
            aggregate.stalls,
            aggregate.win_rate * 100.0,
            aggregate.mean_turns
        )?;
    }

    writeln!(writer, "\n## Runs\n")?;
    writeln!(writer, "| Strategy | Difficulty | Seed | Outcome | Turns | Towns | Gold | Treasures |")?;
    writeln!(writer, "|---|---|---|---|---|---|---|---|")?;
    for record in records {
        let treasures = if record.treasures.is_empty() {
            "-".to_string()
        } else {
            record.treasures.join(", ")
        };
        writeln!(
            writer,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            record.strategy,
            record.difficulty,
            record.seed,
            record.outcome,
            record.turns,
            record.towns_visited,
            record.final_gold,
            treasures
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{GameplayStrategy, aggregate_runs};
    use treasure_game::Difficulty;

    fn records() -> Vec<RunRecord> {
        vec![RunRecord {
            strategy: GameplayStrategy::Gambler,
            difficulty: Difficulty::Hard,
            seed: 7,
            outcome: RunOutcome::Victory,
            turns: 42,
            towns_visited: 9,
            final_gold: 3,
            treasures: vec!["Banana".into(), "Twig".into(), "Spoon".into()],
        }]
    }

    #[test]
    fn json_report_lists_runs_and_aggregates() {
        let records = records();
        let aggregates = aggregate_runs(&records);
        let mut buffer = Vec::new();
        generate_json_report(&mut buffer, &records, &aggregates).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["runs"][0]["strategy"], "gambler");
        assert_eq!(value["runs"][0]["outcome"], "victory");
        assert_eq!(value["aggregates"][0]["victories"], 1);
    }

    #[test]
    fn markdown_report_has_tables() {
        let records = records();
        let aggregates = aggregate_runs(&records);
        let mut buffer = Vec::new();
        generate_markdown_report(&mut buffer, &records, &aggregates).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# Treasure Hunter Simulation Results"));
        assert!(text.contains("| Gambler | hard | 1 | 1 | 0 | 0 | 0 | 100.0% | 42.0 |"));
        assert!(text.contains("Banana, Twig, Spoon"));
    }

    #[test]
    fn console_report_lists_runs_when_verbose() {
        colored::control::set_override(false);
        let records = records();
        let aggregates = aggregate_runs(&records);
        let mut buffer = Vec::new();
        generate_console_report(&mut buffer, &records, &aggregates, Duration::ZERO, true)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Gambler on hard"));
        assert!(text.contains("[Gambler hard seed 7] victory after 42 turns"));
    }
}
