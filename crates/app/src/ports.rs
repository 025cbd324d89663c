//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod decision_log;
pub mod feature_source;

pub use decision_log::DecisionLog;
pub use feature_source::FeatureSource;
