//! Static content: tool list, prompt templates and help pages

pub mod help;
pub mod prompts;
pub mod tools;

pub use help::{ContactChannel, FaqItem, HelpResource, CONTACTS, FAQ, QUICK_TIPS, RESOURCES};
pub use prompts::{prompt_spec, PROMPTS};
pub use tools::{find_tool, TOOLS};
