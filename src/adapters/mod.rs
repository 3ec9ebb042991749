// Adapters layer: concrete implementations for external systems.
// Local file storage lives in config::cli next to the CLI configuration.

pub mod sparql;
