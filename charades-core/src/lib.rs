pub mod errors;
pub mod scheduler;
pub mod session;
pub mod session_events;
pub mod standings;
pub mod turn_clock;
pub mod turn_state;
pub mod word_supply;

// Re-export main components
pub use errors::*;
pub use scheduler::*;
pub use session::*;
pub use session_events::*;
pub use standings::*;
pub use turn_clock::{ClockState, TickOutcome, TurnClock};
pub use turn_state::*;
pub use word_supply::*;
