//! Shared builders for the integration tests.

#![allow(dead_code)]

use unparse::ir::{PredefinedType, TypeRef, TypeReference};

/// Install a test-writer subscriber once; honours `RUST_LOG` (e.g. `RUST_LOG=unparse=debug`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn int() -> TypeRef {
    TypeReference::predefined(PredefinedType::Int32).into_ref()
}

pub fn string() -> TypeRef {
    TypeReference::predefined(PredefinedType::String).into_ref()
}

pub fn named(name: &str) -> TypeRef {
    TypeReference::named(name).into_ref()
}
