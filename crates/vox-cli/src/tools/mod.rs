//! Built-in email tools

mod content;
mod delete;
mod draft;
mod search;
mod summarize;

pub use content::GetEmailContentTool;
pub use delete::DeleteEmailTool;
pub use draft::DraftEmailTool;
pub use search::SearchEmailsTool;
pub use summarize::SummarizeContentTool;

use std::sync::Arc;

use vox_agent::ToolRegistry;

use crate::gmail::GmailClient;

/// Build the registry of email tools over one shared Gmail client.
pub fn email_registry(gmail: Arc<GmailClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(SearchEmailsTool::new(gmail.clone())));
    registry.register(Arc::new(GetEmailContentTool::new(gmail.clone())));
    registry.register(Arc::new(SummarizeContentTool::new()));
    registry.register(Arc::new(DraftEmailTool::new()));
    registry.register(Arc::new(DeleteEmailTool::new(gmail)));
    registry
}
