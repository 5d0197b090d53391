//! Batch orchestration of independent contagion runs.

mod plan;
mod sweep;

pub use plan::{ProbabilityAxis, SweepPlan};
pub use sweep::{sweep, SweepJobReport, SweepReport};
