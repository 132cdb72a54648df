pub mod relay_scheduler;

pub use relay_scheduler::{PendingSpawn, RelayScheduler};
