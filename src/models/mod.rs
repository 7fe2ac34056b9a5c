pub mod card;
pub mod grade;
pub mod schedule;
pub mod stats;

pub use card::Card;
pub use grade::Grade;
pub use schedule::{Schedule, calculate_next_review};
pub use stats::CardStats;
