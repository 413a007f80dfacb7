pub mod facts;
pub mod hints;
pub mod rules;
pub mod types;

pub use facts::{derive_facts, ConfigFacts};
pub use hints::generate_hints;
pub use rules::evaluate_consequences;
pub use types::{Consequence, ScenarioHint, Severity};
