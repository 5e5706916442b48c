//! Full-screen history browser over saved runs.
mod render;
mod state;
mod terminal;
mod theme;


pub use state::{DashboardState, KeyOutcome, View, success_rate};
pub use terminal::{draw, run_dashboard};
