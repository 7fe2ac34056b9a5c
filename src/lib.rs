pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod review;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, SchedulerConfig};
pub use database::{CardStore, SqliteCardStore};
pub use error::{RepetitionError, Result};
pub use models::{Card, CardStats, Grade, Schedule};
pub use review::{CardManager, ReviewSession};
