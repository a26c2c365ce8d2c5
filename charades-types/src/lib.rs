pub mod errors;
pub mod game;
pub mod messages;
pub mod standing;
pub mod turn;
pub mod view;
pub mod word;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use standing::*;
pub use turn::*;
pub use view::*;
pub use word::*;
