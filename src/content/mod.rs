//! Content module - post models, front-matter and markdown processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use post::{PostId, PostSummary, RenderedPost, RouteParams};
