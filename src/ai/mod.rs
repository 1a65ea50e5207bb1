pub mod client;
pub mod gateway;

// Public API exports
pub use client::{ModelConfig, OpenRouterClient, DEFAULT_MODEL};
pub use gateway::{parse_key_points, parse_quiz, AiGateway, Completion, Credentials, GatewayError};
