//! blogposts: markdown blog posts for static-site generators
//!
//! Reads a flat directory of `<id>.md` files with front-matter and exposes
//! the three lookups a static-site generator needs: all posts newest first,
//! every post id for route generation, and one post rendered to HTML.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;

pub use content::{FrontMatter, PostLoader, PostSummary, RenderedPost, RouteParams};
pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// Config file looked up in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A blog rooted at a base directory
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Posts loader, bound to the resolved posts directory
    pub posts: PostLoader,
}

impl Blog {
    /// Create a new Blog from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config<P: Into<PathBuf>>(base_dir: P, config: config::BlogConfig) -> Self {
        let base_dir = base_dir.into();
        let posts_dir = base_dir.join(&config.posts_dir);
        let renderer = content::MarkdownRenderer::from_config(&config.markdown);
        tracing::debug!("Posts directory: {:?}", posts_dir);

        Self {
            posts: PostLoader::new(posts_dir, renderer),
            config,
            base_dir,
        }
    }

    /// All posts, newest first
    pub fn list_posts(&self) -> Result<Vec<PostSummary>> {
        self.posts.list_posts()
    }

    /// Route parameters for every post
    pub fn list_post_ids(&self) -> Result<Vec<RouteParams>> {
        self.posts.list_post_ids()
    }

    /// A single post rendered to HTML
    pub async fn render_post(&self, id: &str) -> Result<RenderedPost> {
        self.posts.render_post(id).await
    }
}
