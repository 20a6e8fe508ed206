use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::{command, Arg};
use context::Context;
use log::debug;

mod context;
mod generator;
mod index;
mod markup;
mod metadata;
mod output;
mod post;
mod templates;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args([
            Arg::new("output")
                .short('o')
                .long("output")
                .help("The folder to generate HTML files to.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("./docs"),
            Arg::new("posts")
                .short('d')
                .long("posts")
                .help("The folder to read posts from.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("./posts"),
            Arg::new("templates")
                .short('t')
                .long("templates")
                .help("The folder to read templates from.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("./templates"),
            Arg::new("date_format")
                .long("date-format")
                .help("chrono format of the table of contents date labels.")
                .default_value(index::DEFAULT_DATE_FORMAT),
        ])
        .get_matches();

    let post_dir: &PathBuf = matches.get_one("posts").unwrap();
    if !post_dir.is_dir() {
        bail!("posts must be a directory.");
    }
    let out_dir: &PathBuf = matches.get_one("output").unwrap();
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("if output exists, it must be a directory.");
    }
    let out_dir = std::path::absolute(out_dir)
        .with_context(|| format!("Failed to get absolute path of {out_dir:?}"))?;
    let template_dir: &PathBuf = matches.get_one("templates").unwrap();
    if !template_dir.is_dir() {
        bail!("templates must be a directory.");
    }
    let date_format: &String = matches.get_one("date_format").unwrap();
    if !index::is_valid_date_format(date_format) {
        bail!("invalid date format {date_format:?}");
    }

    let handlebars = templates::generate_renderer(template_dir)?;

    let ctx = Context {
        post_dir: post_dir.to_owned(),
        out_dir,
        blog_name: std::env::var("BLOG_NAME").unwrap_or_default(),
        date_format: date_format.to_owned(),
        handlebars,
    };
    debug!(
        "Building {:?} from {:?} with templates from {template_dir:?}",
        ctx.out_dir, ctx.post_dir
    );

    generator::generate(&ctx)
}
