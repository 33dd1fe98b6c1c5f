pub mod accumulator;
pub mod calculations;
pub mod coordinator;
pub mod growth;
pub mod resolver;

pub use accumulator::{GddAccumulator, TickInput, TickOutcome};
pub use coordinator::{GddCoordinator, LEASE_HEARTBEAT, LEASE_TTL};
pub use growth::TurfGrowthModel;
