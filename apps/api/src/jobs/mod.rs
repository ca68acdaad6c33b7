// Job search: skills list -> postings from the remote search API.
// Two transport strategies; every failure degrades to an empty result.

pub mod client;
pub mod handlers;
pub mod transport;
