//! Observability for Nosh: tracing subscriber setup.

pub mod tracing_setup;
