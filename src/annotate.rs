//! Annotation formatter and inserter

use crate::schema::FunctionDoc;

/// Generic type written into every `@param` and `@return` tag
pub const DEFAULT_TYPE_TAG: &str = "Object";

/// Rendering options for annotation blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationStyle {
    pub type_tag: String,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            type_tag: DEFAULT_TYPE_TAG.to_string(),
        }
    }
}

/// A block of text to insert at a byte offset of the original source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub offset: usize,
    pub text: String,
}

/// Render the comment block for `doc`, every line prefixed with `indent`.
///
/// The block ends with a newline so it can be placed directly before the
/// signature's line.
pub fn format_annotation(doc: &FunctionDoc, indent: &str, style: &AnnotationStyle) -> String {
    let mut block = format!("{indent}/**\n{indent} *\n");
    for param in &doc.params {
        block.push_str(&format!("{indent} * @param {{{}}} {}\n", style.type_tag, param));
    }
    if let Some(expr) = &doc.returns {
        block.push_str(&format!("{indent} * @return {{{}}} {}\n", style.type_tag, expr));
    }
    block.push_str(&format!("{indent} */\n"));
    block
}

/// Splice `insertions` into `text` in a single pass.
///
/// Offsets refer to the original text, so identical signatures at different
/// places each get their own block. Offsets must lie on char boundaries;
/// insertions sharing an offset keep their given order.
pub fn insert_annotations(text: &str, insertions: &[Insertion]) -> String {
    let mut ordered: Vec<&Insertion> = insertions.iter().collect();
    ordered.sort_by_key(|ins| ins.offset);

    let extra: usize = ordered.iter().map(|ins| ins.text.len()).sum();
    let mut out = String::with_capacity(text.len() + extra);
    let mut cursor = 0;

    for ins in ordered {
        let at = ins.offset.min(text.len());
        out.push_str(&text[cursor..at]);
        out.push_str(&ins.text);
        cursor = at;
    }
    out.push_str(&text[cursor..]);
    out
}
