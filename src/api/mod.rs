//! API route groups
//!
//! The three JSON API areas wired into the shell: data, rules and OAuth.
//! Each group owns its URL space below the prefix the shell registered it
//! under and does its own, finer-grained 4xx handling; anything it returns
//! as `Err` escapes to the shell's catch-all handler and becomes a 500.

pub mod data;
pub mod oauth;
mod response;
pub mod rules;

pub use response::{bad_request, json_response, not_found};
