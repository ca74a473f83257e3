mod error;
mod messages_request;
mod messages_response;

pub use error::{AnthropicErrorBody, AnthropicErrorObject};
pub use messages_request::{Message, MessagesRequest};
pub use messages_response::{ContentBlock, MessagesResponse};
