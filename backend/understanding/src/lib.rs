pub mod anthropic;
pub mod fence;
pub mod mock;
pub mod prompt;
pub mod reply;

pub use anthropic::{AnthropicAnalyzer, MessagesResponse, ResponseBlock};
pub use fence::{extract_fenced_block, strip_code_fences};
pub use mock::MockAnalyzer;
pub use reply::parse_analysis;
