//! Typed host-domain contracts shared by the carousel runtime and its browser adapter.
//!
//! This crate is the API-first boundary for host timing services. It exposes the [`Scheduler`]
//! contract (repeating and one-shot callbacks behind cancellable [`TimerHandle`] values) and two
//! in-process adapters, while the concrete browser adapter lives in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod scheduler;

pub use scheduler::manual::ManualScheduler;
pub use scheduler::{
    IntervalCallback, NoopScheduler, Scheduler, TimeoutCallback, TimerHandle, TimerKind,
    NO_TIMER_HOST,
};
