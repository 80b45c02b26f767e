pub mod discover;

pub use discover::discover_templates;
