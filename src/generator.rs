use std::time::Instant;

use anyhow::Context as _;
use log::{debug, info};

use crate::{
    context::Context,
    index::build_index,
    markup,
    output::write_atomic,
    post::{parse_all, Post},
    templates::render_page,
};

mod data;

use data::{ArticlePageData, IndexPageData};

fn generate_index(ctx: &Context, posts: &[Post]) -> anyhow::Result<()> {
    let path = ctx.out_dir.join("index.html");
    info!("Rendering the homepage to {path:?}");

    let data = IndexPageData {
        blog_name: &ctx.blog_name,
        toc: build_index(posts, &ctx.date_format),
        posts,
    };
    let page = render_page(&ctx.handlebars, "index", &data)
        .context("while generating index.html")?;
    write_atomic(&path, page.as_bytes())
}

fn generate_article(ctx: &Context, post: &Post) -> anyhow::Result<()> {
    let path = ctx.out_dir.join(&post.output_path);
    info!("Rendering post {:?} to {path:?}", post.title);

    let data = ArticlePageData {
        blog_name: &ctx.blog_name,
        body: markup::render(&post.body),
        post,
    };
    let page = render_page(&ctx.handlebars, "article", &data)
        .with_context(|| format!("while generating {}", post.slug))?;
    write_atomic(&path, page.as_bytes())
}

/// Parses every post, then writes the homepage and one page per post. Stops
/// at the first failure; pages written before it stay on disk.
pub(crate) fn generate(ctx: &Context) -> anyhow::Result<()> {
    let started = Instant::now();

    let posts = parse_all(&ctx.post_dir).context("Failed to parse posts")?;

    fs_extra::dir::create_all(&ctx.out_dir, false)
        .with_context(|| format!("Failed to create output directory {:?}", ctx.out_dir))?;

    generate_index(ctx, &posts)?;
    for post in posts.iter() {
        generate_article(ctx, post)?;
    }

    debug!(
        "Generated {} pages in {:?}",
        posts.len() + 1,
        started.elapsed()
    );
    Ok(())
}
