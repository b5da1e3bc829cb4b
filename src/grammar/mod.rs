pub mod engine;
pub mod state;
pub mod tags;
pub mod transition;

pub use engine::{Step, step};
pub use state::State;
pub use transition::{Transition, transition};
