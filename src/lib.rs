pub mod config;
pub mod error;
pub mod providers;
pub mod server;
pub mod token_broker;

mod utils;

pub use config::Config;
pub use error::RelayError;
pub use providers::{Dispatcher, Providers};
pub use server::{RelayState, relay_router};
pub use token_broker::{ServiceAccountBroker, TokenBroker};
