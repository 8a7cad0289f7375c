pub mod generator;
pub mod planner;

pub use generator::TextGenerator;
pub use planner::Planner;
