//! Test harness utilities shared by the daemon suites.

mod config_loader;
mod reporter;
mod service_world;
mod shutdown;
mod world;

pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use service_world::{ServiceWorld, StepResult};
pub use shutdown::TestShutdownSignal;
pub use world::{TestWorld, world};
