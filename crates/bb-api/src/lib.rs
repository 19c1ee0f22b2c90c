//! Blackboard service: RPC dispatch, Axum routes, and process bootstrap helpers.

pub mod config;
pub mod pidfile;
pub mod rpc;
pub mod server;
