use serde::Serialize;

use crate::post::Post;

#[derive(Serialize, Debug)]
pub(super) struct ArticlePageData<'a> {
    pub blog_name: &'a str,
    pub body: String,
    pub post: &'a Post,
}

#[derive(Serialize, Debug)]
pub(super) struct IndexPageData<'a> {
    pub blog_name: &'a str,
    pub toc: String,
    pub posts: &'a [Post],
}
