// Adapters layer: concrete implementations for external systems (artifact files, http, history file).

pub mod features;
pub mod history;
pub mod http;
