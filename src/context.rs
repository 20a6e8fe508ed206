use std::path::PathBuf;

use handlebars::Handlebars;

#[derive(Debug)]
pub(crate) struct Context {
    pub post_dir: PathBuf,
    pub out_dir: PathBuf,

    pub blog_name: String,
    pub date_format: String,

    pub handlebars: Handlebars<'static>,
}
