//! Snippets Module
//!
//! Short-lived text snippets: storage and the page handlers.
//!
//! # Module Structure
//!
//! ```text
//! snippets/
//! ├── mod.rs       - Module exports
//! ├── models.rs    - Snippet, SnippetRepository, PostgreSQL and in-memory stores
//! └── handlers.rs  - Home, view and create handlers, create form
//! ```

pub mod handlers;
pub mod models;

pub use handlers::SnippetCreateForm;
pub use models::{MemorySnippets, PgSnippets, Snippet, SnippetRepository, LATEST_LIMIT};
