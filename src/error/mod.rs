mod relay;
mod token;
mod upstream;

pub use relay::RelayError;
pub use token::TokenError;
pub use upstream::UpstreamError;
