//! Inbound adapters translating user input into domain calls.

pub mod cli;
