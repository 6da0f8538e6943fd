//! Wizard flows — one generalized controller, three configurations.
//!
//! ARCHITECTURE
//! ============
//! `state` owns the per-instance mutable flow state, `config` declares the
//! per-flow shape (endpoints, regions, copy, timings), and `controller`
//! runs the transition protocol over both. The page's three wizard
//! instances are three `FlowConfig` values driving the same controller.

pub mod config;
pub mod controller;
pub mod state;
