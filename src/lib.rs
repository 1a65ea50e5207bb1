pub mod ai;
pub mod ai_worker;
pub mod export;
pub mod logger;
pub mod models;
pub mod render;
pub mod theme;
pub mod ui;
pub mod utils;
pub mod workspace;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use ai::{AiGateway, Completion, Credentials, GatewayError, OpenRouterClient, DEFAULT_MODEL};
pub use ai_worker::spawn_ai_worker;
pub use export::export_document;
pub use models::{App, AppState, Document, Question, INITIAL_CONTENT, INITIAL_TITLE};
pub use render::{build_page, PageView};
pub use theme::{LayoutKind, Theme, THEMES};
pub use ui::{draw_quit_confirmation, draw_workspace};
pub use workspace::{apply_ai_response, handle_workspace_input, request_ai};
