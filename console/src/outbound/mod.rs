//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest client for the CRM backend
//! - **storage**: file-backed session storage in the state directory
//!
//! Adapters translate between domain types and wire or disk formats. They
//! contain no business logic.

pub mod http;
pub mod storage;
