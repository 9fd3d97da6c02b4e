//! Typed client and terminal console for the garage CRM backend.
//!
//! The crate follows a hexagonal layout:
//! - [`domain`]: records, forms, route access, session and query caching,
//!   plus the ports the backend and session storage sit behind.
//! - [`outbound`]: reqwest and filesystem adapters implementing the ports.
//! - [`inbound`]: the `crm` command-line front end.
//!
//! [`bootstrap`] wires the pieces from [`config`] settings.

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;
