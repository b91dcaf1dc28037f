pub mod engine;
pub mod schedule;

pub use engine::{PracticeEngine, PracticeOutcome};
pub use schedule::{advance, interval_days, is_due, MAX_INTERVAL_INDEX, SR_INTERVALS};
