mod client;

pub use client::ClaudeProvider;
