//! Terminal client for a medical chatbot HTTP API.

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
