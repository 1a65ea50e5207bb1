pub mod layout;
pub mod markdown;
pub mod page;

pub use layout::{calculate_page_chunks, PageChunks};
pub use markdown::render_markdown;
pub use page::{balance_columns, build_page, PageView};
