//! Outbound adapters for Parlor.

pub mod http_chat_gateway;

pub use http_chat_gateway::HttpChatGateway;
