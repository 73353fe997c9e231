//! Executor Layer Tests
//!
//! Tests for the sqlnav-executor crate which provides:
//! - Command enum - the instruction set
//! - Output enum - typed results
//! - Executor - stateless command dispatch
//! - Session - stateful transaction support
//! - SqlNav - high-level typed wrapper API

mod common;

mod command_dispatch;
mod connection_lifetimes;
mod error_handling;
mod session_transactions;
mod sqlnav_api;
