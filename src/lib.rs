//! Client for a security-incident ticketing service.
//!
//! The session store, API gateway and view state live here; the
//! `ticketdesk` binary renders the views as CLI commands.

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;
pub mod storage;
pub mod tasks;
pub mod views;
