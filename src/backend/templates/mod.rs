//! Templates Module
//!
//! Page rendering: a read-only cache of compiled pages built at startup, the
//! data every page renders against, and the buffered page response.
//!
//! # Module Structure
//!
//! ```text
//! templates/
//! ├── mod.rs      - Module exports
//! ├── cache.rs    - TemplateCache, TemplateSources, TemplateError
//! ├── data.rs     - TemplateData
//! ├── helpers.rs  - human_date helper
//! └── page.rs     - render_page
//! ```

pub mod cache;
pub mod data;
pub mod helpers;
pub mod page;

pub use cache::{TemplateCache, TemplateError, TemplateSources};
pub use data::TemplateData;
pub use page::render_page;
