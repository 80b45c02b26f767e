pub mod assets;
pub mod context;
pub mod file;
pub mod plan;

pub use context::{build_variables, Variables, BUILTIN_KEYS};
pub use file::{substitute, unknown_placeholders};
pub use plan::{
    execute_plan, plan_bundle, plan_template, BuiltBundle, BundlePlan, FileKind, PlannedFile,
};
