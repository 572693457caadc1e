use crate::dom::Document;

/// Identifier prefix flagging elements whose content is raw author-entered
/// markup awaiting rendering.
pub const MARKED_PREFIX: &str = "marked";

/// The external markup renderer at its interface boundary: consumes raw
/// author-entered text, returns sanitized formatted markup. Sanitization is
/// the renderer's responsibility.
pub trait MarkupRenderer {
    fn render(&self, raw: &str) -> String;
}

impl<F> MarkupRenderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, raw: &str) -> String {
        self(raw)
    }
}

/// One-shot page-load pass: replaces the content of every flagged element
/// with the renderer's output for its raw text. Returns how many elements
/// were rendered.
///
/// Re-running on already rendered output is unsupported.
pub fn render_markup<D, R>(doc: &mut D, renderer: &R) -> usize
where
    D: Document,
    R: MarkupRenderer + ?Sized,
{
    let mut rendered = 0;
    for id in doc.element_ids() {
        if !id.starts_with(MARKED_PREFIX) {
            continue;
        }
        if let Some(raw) = doc.text(&id) {
            doc.set_markup(&id, &renderer.render(&raw));
            rendered += 1;
        }
    }
    rendered
}
