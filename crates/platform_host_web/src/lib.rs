//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for timer scheduling. The
//! [`WebScheduler`] drives `window.setInterval` / `window.setTimeout`, and [`adapters`] picks the
//! scheduler for the active build (browser on `wasm32`, headless no-op elsewhere).

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod scheduler;

pub use adapters::{
    host_strategy_name, scheduler, selected_host_strategy, HostStrategy, SchedulerAdapter,
};
pub use scheduler::WebScheduler;
