pub mod locks;
pub mod manager;
pub mod mask;
pub mod queue;
pub mod session;

pub use locks::KeyLocks;
pub use manager::{CardManager, DuePrompt};
pub use mask::masked_prompt;
pub use queue::ReviewQueue;
pub use session::ReviewSession;
