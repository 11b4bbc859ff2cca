pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod search;

// Re-export commonly used types
pub use config::Config;
pub use error::SynapseError;
pub use generator::report::Report;
pub use generator::workflow::{launch, launch_with_backend};
