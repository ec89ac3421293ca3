//! Integration tests for the configuration accessor

mod document_store;
mod flat_store;
mod store_settings;
