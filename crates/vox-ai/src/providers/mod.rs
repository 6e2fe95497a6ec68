//! Provider implementations

pub mod google;
pub mod openai;

pub use google::GoogleProvider;
pub use openai::OpenAiProvider;
