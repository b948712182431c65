//! Field tag segmenter: splits the block 4 body into ordered field spans.
//!
//! A single left-to-right scan recognizes tag delimiters of the shape
//! `:NN:` or `:NNX:` (two digits plus an optional uppercase suffix letter,
//! between colons). Everything from just after a delimiter up to the next
//! delimiter, or the end of the body, is that tag's raw value — including
//! embedded newlines of multi-line values, which never open a new span on
//! their own. The suffix letter is part of the tag unit: `:50F:` and
//! `:50K:` are distinct tags, and matching only the leading digits would
//! truncate values early.

/// One `(tag, raw value)` pair in block 4, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpan {
    /// Tag without colons, e.g. `20`, `32A`, `50F`.
    pub tag: String,
    /// Raw value, untrimmed, newlines preserved.
    pub value: String,
}

/// Segment a block 4 body into field spans. Text before the first
/// delimiter (there normally is none) is discarded.
pub fn segment_fields(body: &str) -> Vec<FieldSpan> {
    let bytes = body.as_bytes();
    let mut spans: Vec<FieldSpan> = Vec::new();
    // (tag, value start) of the span currently being accumulated.
    let mut open: Option<(String, usize)> = None;
    let mut i = 0;
    while i < bytes.len() {
        match delimiter_len(bytes, i) {
            Some(len) => {
                if let Some((tag, start)) = open.take() {
                    spans.push(FieldSpan {
                        tag,
                        value: body[start..i].to_owned(),
                    });
                }
                // Tag text sits between the two colons.
                open = Some((body[i + 1..i + len - 1].to_owned(), i + len));
                i += len;
            }
            None => i += 1,
        }
    }
    if let Some((tag, start)) = open {
        spans.push(FieldSpan {
            tag,
            value: body[start..].to_owned(),
        });
    }
    spans
}

/// If a tag delimiter starts at byte `i`, return its length in bytes
/// (4 for `:NN:`, 5 for `:NNX:`). All delimiter bytes are ASCII, so the
/// returned boundaries are always char boundaries.
fn delimiter_len(bytes: &[u8], i: usize) -> Option<usize> {
    if bytes.get(i) != Some(&b':') {
        return None;
    }
    let d1 = *bytes.get(i + 1)?;
    let d2 = *bytes.get(i + 2)?;
    if !d1.is_ascii_digit() || !d2.is_ascii_digit() {
        return None;
    }
    match *bytes.get(i + 3)? {
        b':' => Some(4),
        c if c.is_ascii_uppercase() && bytes.get(i + 4) == Some(&b':') => Some(5),
        _ => None,
    }
}
