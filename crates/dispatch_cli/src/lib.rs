//! Interactive front end for the dispatch engine: command parsing, rendering and the
//! read-eval-print session that ties them to a [`dispatch_core::DispatchEngine`].

pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
