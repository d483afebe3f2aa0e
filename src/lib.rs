// Library target exists for criterion benchmarks and the integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// that harnesses can import types via `cwdr::morse::*` / `cwdr::session::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by benchmarks and integration tests
pub mod audio;
pub mod engine;
pub mod morse;
pub mod session;
pub mod store;

// Private: required transitively by the modules above (won't compile without them)
mod app;
mod config;
mod event;
mod ui;
