//! Web search: the Serper client and the raw-result → resource mapper.

pub mod client;
pub mod mapper;

pub use client::{SearchError, SerperClient, WebSearch};
