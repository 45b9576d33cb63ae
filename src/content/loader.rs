//! Post loader - lists, enumerates and renders posts from the posts directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::{post, FrontMatter, MarkdownRenderer, PostSummary, RenderedPost, RouteParams};
use crate::error::{Error, Result};

/// Extension of post files
const POST_EXTENSION: &str = ".md";

/// Loads posts from a single, flat posts directory
pub struct PostLoader {
    posts_dir: PathBuf,
    renderer: Arc<MarkdownRenderer>,
}

impl PostLoader {
    /// Create a new loader for `posts_dir`
    pub fn new<P: Into<PathBuf>>(posts_dir: P, renderer: MarkdownRenderer) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer: Arc::new(renderer),
        }
    }

    /// The directory posts are read from
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Load the front-matter of every post, newest first
    pub fn list_posts(&self) -> Result<Vec<PostSummary>> {
        let mut posts = Vec::new();

        for (id, path) in self.post_files()? {
            let content = read_post_file(&path)?;
            let (front_matter, _) = parse_front_matter(&path, &content)?;
            posts.push(PostSummary { id, front_matter });
        }

        post::sort_by_date_desc(&mut posts);

        tracing::debug!("Listed {} posts from {:?}", posts.len(), self.posts_dir);
        Ok(posts)
    }

    /// Route parameters for every post, in file name order
    pub fn list_post_ids(&self) -> Result<Vec<RouteParams>> {
        Ok(self
            .post_files()?
            .into_iter()
            .map(|(id, _)| RouteParams::new(id))
            .collect())
    }

    /// Load a single post and render its body to HTML
    pub async fn render_post(&self, id: &str) -> Result<RenderedPost> {
        validate_id(id)?;

        let path = self.posts_dir.join(format!("{}{}", id, POST_EXTENSION));
        let content = read_post_file(&path)?;
        let (front_matter, body) = parse_front_matter(&path, &content)?;

        let body = body.to_string();
        let renderer = Arc::clone(&self.renderer);
        let content_html = tokio::task::spawn_blocking(move || renderer.render(&body))
            .await
            .map_err(|e| Error::Render(format!("{}: {}", id, e)))?;

        tracing::debug!("Rendered post {} ({} bytes)", id, content_html.len());

        Ok(RenderedPost {
            id: id.to_string(),
            content_html,
            front_matter,
        })
    }

    /// Post files directly inside the posts directory, as (id, path),
    /// sorted by file name
    fn post_files(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.posts_dir.is_dir() {
            return Err(Error::DirectoryNotFound {
                path: self.posts_dir.clone(),
            });
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| Error::FileRead {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.posts_dir.clone()),
                source: e.into(),
            })?;
            let path = entry.path();

            if !entry.file_type().is_file() {
                tracing::debug!("Skipping non-file entry {:?}", path);
                continue;
            }

            match post_id(path) {
                Some(id) => files.push((id, path.to_path_buf())),
                None if is_hidden(path) => tracing::debug!("Skipping hidden file {:?}", path),
                None => tracing::warn!(
                    "Skipping {:?}: posts must end in {}",
                    path,
                    POST_EXTENSION
                ),
            }
        }

        Ok(files)
    }
}

/// Derive a post id from its file name: `hello-world.md` -> `hello-world`.
/// Hidden files and files without the post extension are not posts.
fn post_id(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    name.strip_suffix(POST_EXTENSION)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Reject ids that would resolve outside the posts directory
fn validate_id(id: &str) -> Result<()> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0']);
    if invalid {
        return Err(Error::InvalidIdentifier(id.to_string()));
    }
    Ok(())
}

fn read_post_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::FileRead {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn parse_front_matter<'a>(path: &Path, content: &'a str) -> Result<(FrontMatter, &'a str)> {
    FrontMatter::parse(content).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
