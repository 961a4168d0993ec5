//! Game module - frame loop state and timing

mod input;
mod state;
mod time;

pub use input::FrameInput;
pub use state::{FrameOutput, Simulation};
pub use time::IntervalTimer;
