pub mod aggregate;
pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;

pub use aggregate::{RunAggregate, aggregate_runs};
pub use policy::GameplayStrategy;
pub use seeds::{clock_seed, resolve_seed_inputs};
pub use simulation::{DEFAULT_MAX_TURNS, RunOutcome, RunRecord, SimulationConfig, run_simulation};
