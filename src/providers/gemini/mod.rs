mod client;
mod safety;

pub use client::GeminiProvider;
pub use safety::SAFETY_POLICY;
