mod agent;
mod task;

pub use agent::*;
pub use task::*;
