pub mod agents;
pub mod context;
pub mod outlet;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod task;
pub mod workflow;
