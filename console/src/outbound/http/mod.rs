//! Reqwest adapters for the CRM backend REST API.
//!
//! This adapter owns transport details only: URL building, bearer auth,
//! error message normalisation, and JSON decoding into domain records.

mod client;
mod dto;
mod resources;

pub use client::BackendApi;
