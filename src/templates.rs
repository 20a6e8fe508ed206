use std::path::Path;

use anyhow::Context;
use chrono::DateTime;
use handlebars::{handlebars_helper, Handlebars};
use log::debug;
use serde::Serialize;

use crate::index::is_valid_date_format;

const DOCUMENT_PREFIX: &str = "<!DOCTYPE html>\n<html>\n";
const DOCUMENT_SUFFIX: &str = "\n</html>";

handlebars_helper!(date: |timestamp: str, format: str| {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(t) if is_valid_date_format(format) => t.format(format).to_string(),
        _ => timestamp.to_string(),
    }
});

/// Loads `index.hbs` and `article.hbs` from `template_dir`. Any other `.hbs`
/// file there becomes a partial named after its file stem.
pub(crate) fn generate_renderer(template_dir: &Path) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("date", Box::new(date));
    handlebars
        .register_template_file("index", template_dir.join("index.hbs"))
        .context("index.hbs")?;
    handlebars
        .register_template_file("article", template_dir.join("article.hbs"))
        .context("article.hbs")?;

    let entries = std::fs::read_dir(template_dir)
        .with_context(|| format!("Failed to read template directory {template_dir:?}"))?;
    for entry in entries {
        let path = entry?.path();
        if !path.extension().is_some_and(|ext| ext == "hbs") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if name == "index" || name == "article" {
            continue;
        }
        debug!("Registering partial {name} from {path:?}");
        handlebars
            .register_partial(name, std::fs::read_to_string(&path).context(name.to_string())?)
            .with_context(|| format!("partial {name}"))?;
    }

    Ok(handlebars)
}

pub(crate) fn render_page<T: Serialize>(
    handlebars: &Handlebars,
    name: &str,
    data: &T,
) -> anyhow::Result<String> {
    let body = handlebars
        .render(name, data)
        .with_context(|| format!("Failed to render template {name}"))?;
    Ok(format!("{DOCUMENT_PREFIX}{body}{DOCUMENT_SUFFIX}"))
}
