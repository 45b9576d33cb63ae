//! List posts and post ids

use anyhow::{Context, Result};

use crate::Blog;

/// Print all posts, newest first
pub fn posts(blog: &Blog, json: bool) -> Result<()> {
    let posts = blog.list_posts().context("Failed to list posts")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in posts {
        let fm = &post.front_matter;
        println!(
            "  {} - {} [{}]",
            fm.date.as_deref().unwrap_or("----------"),
            fm.title.as_deref().unwrap_or("Untitled"),
            post.id
        );
    }

    Ok(())
}

/// Print the route parameters of every post
pub fn ids(blog: &Blog, json: bool) -> Result<()> {
    let ids = blog.list_post_ids().context("Failed to list post ids")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ids)?);
        return Ok(());
    }

    for route in ids {
        println!("{}", route.id());
    }

    Ok(())
}
