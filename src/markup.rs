//! Plain-text markup to HTML. Rendering is three passes and their order
//! matters: [`reflow`] normalizes wrapping, [`html`] structures the result,
//! then [`transform`] rewrites image links and adds heading permalinks.

mod blocks;
mod html;
mod reflow;
mod transform;

use transform::Transforms;

pub(crate) fn render(markup: &str) -> String {
    let text = reflow::reflow(markup, reflow::WRAP_WIDTH);
    let html = html::to_html(&text);
    Transforms::default().apply(html)
}
