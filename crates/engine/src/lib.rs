//! Autoplay and scheduling on top of the core rules.
//!
//! - [`evaluator`]: heuristic board score
//! - [`search`]: best placement for the current piece
//! - [`autoplay`]: executes a placement one command per tick
//! - [`session`]: virtual-clock scheduler for drops and autoplay ticks

pub mod autoplay;
pub mod evaluator;
pub mod search;
pub mod session;

pub use autoplay::{Autoplay, Fingerprint};
pub use evaluator::{evaluate, evaluate_with, BoardFeatures, Weights};
pub use search::{find_best_placement, find_best_placement_with, rotation_states, Placement};
pub use session::{Session, SessionConfig};
