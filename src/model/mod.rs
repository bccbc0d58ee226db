pub mod config;
pub mod section;
pub mod settings;
pub mod task;

pub use config::*;
pub use section::*;
pub use settings::*;
pub use task::*;
