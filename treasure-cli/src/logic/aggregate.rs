use serde::Serialize;
use std::collections::BTreeMap;
use treasure_game::Difficulty;
use treasure_game::numbers::ratio;

use crate::logic::policy::GameplayStrategy;
use crate::logic::simulation::{RunOutcome, RunRecord};

/// Summary of every run sharing a strategy and difficulty.
#[derive(Debug, Clone, Serialize)]
pub struct RunAggregate {
    pub strategy: GameplayStrategy,
    pub difficulty: Difficulty,
    pub runs: usize,
    pub victories: usize,
    pub defeats: usize,
    pub exits: usize,
    pub stalls: usize,
    pub win_rate: f64,
    pub mean_turns: f64,
    pub std_turns: f64,
    pub mean_towns: f64,
    pub mean_final_gold: f64,
}

/// Group records by (strategy, difficulty), ordered by strategy then tier.
#[must_use]
pub fn aggregate_runs(records: &[RunRecord]) -> Vec<RunAggregate> {
    let mut builders: BTreeMap<(GameplayStrategy, usize), AggregateBuilder> = BTreeMap::new();
    for record in records {
        let tier = Difficulty::ALL
            .iter()
            .position(|tier| *tier == record.difficulty)
            .unwrap_or(usize::MAX);
        builders
            .entry((record.strategy, tier))
            .or_insert_with(|| AggregateBuilder::new(record))
            .ingest(record);
    }
    builders.into_values().map(AggregateBuilder::finish).collect()
}

#[derive(Debug, Clone)]
struct AggregateBuilder {
    strategy: GameplayStrategy,
    difficulty: Difficulty,
    turns: Samples,
    towns: Samples,
    gold: Samples,
    runs: usize,
    victories: usize,
    defeats: usize,
    exits: usize,
    stalls: usize,
}

impl AggregateBuilder {
    fn new(record: &RunRecord) -> Self {
        Self {
            strategy: record.strategy,
            difficulty: record.difficulty,
            turns: Samples::default(),
            towns: Samples::default(),
            gold: Samples::default(),
            runs: 0,
            victories: 0,
            defeats: 0,
            exits: 0,
            stalls: 0,
        }
    }

    fn ingest(&mut self, record: &RunRecord) {
        self.runs += 1;
        self.turns.add(f64::from(record.turns));
        self.towns.add(f64::from(record.towns_visited));
        self.gold.add(f64::from(record.final_gold));
        match record.outcome {
            RunOutcome::Victory => self.victories += 1,
            RunOutcome::Defeat => self.defeats += 1,
            RunOutcome::PlayerExit => self.exits += 1,
            RunOutcome::Stalled => self.stalls += 1,
        }
    }

    fn finish(self) -> RunAggregate {
        RunAggregate {
            strategy: self.strategy,
            difficulty: self.difficulty,
            runs: self.runs,
            victories: self.victories,
            defeats: self.defeats,
            exits: self.exits,
            stalls: self.stalls,
            win_rate: ratio(self.victories, self.runs),
            mean_turns: self.turns.mean(),
            std_turns: self.turns.std_dev(),
            mean_towns: self.towns.mean(),
            mean_final_gold: self.gold.mean(),
        }
    }
}

/// Samples of one per-run metric.
#[derive(Debug, Default, Clone)]
struct Samples(Vec<f64>);

impl Samples {
    fn add(&mut self, value: f64) {
        self.0.push(value);
    }

    fn mean(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.iter().sum::<f64>() / count(self.0.len())
    }

    /// Sample standard deviation; zero for fewer than two samples.
    fn std_dev(&self) -> f64 {
        if self.0.len() < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let squares: f64 = self.0.iter().map(|value| (value - mean).powi(2)).sum();
        (squares / count(self.0.len() - 1)).sqrt()
    }
}

fn count(len: usize) -> f64 {
    f64::from(u32::try_from(len).unwrap_or(u32::MAX))
}
