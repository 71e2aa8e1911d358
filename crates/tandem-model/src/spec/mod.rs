mod coordinator;
pub use coordinator::{CoordinatorConfig, MIN_POOL_SIZE};

mod scenario;
pub use scenario::Scenario;

mod timings;
pub use timings::Timings;

mod simulation;
pub use simulation::SimulationConfig;
