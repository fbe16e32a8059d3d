pub mod assistant;
pub mod category;
pub mod config;
pub mod error;
pub mod reassign;
pub mod store;

pub use assistant::Assistant;
pub use config::Config;
pub use error::{BrainDumpError, Result};
pub use reassign::{ActionToken, Choice, Outcome, ReassignmentFlow, ReassignmentPrompt};
pub use store::{Entry, Store, UserProfile};

// Category system
pub use category::{
    BuiltinCategory, CategoryDef, CategoryRegistry, Classifier, DEFAULT_CATEGORIES,
    FALLBACK_CATEGORY,
};
