//! Render a single post

use anyhow::{Context, Result};

use crate::Blog;

/// Print the rendered HTML of a post, or the whole post as JSON
pub async fn run(blog: &Blog, id: &str, json: bool) -> Result<()> {
    let post = blog
        .render_post(id)
        .await
        .with_context(|| format!("Failed to render post {:?}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", post.content_html);
    }

    Ok(())
}
