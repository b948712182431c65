//! Block splitter: locates the five numbered SWIFT blocks in a raw message.
//!
//! Blocks 1, 2, 3 and 5 are `{N:...}` groups; blocks 3 and 5 carry nested
//! `{sub-tag:value}` groups using the same brace character, so extraction
//! matches the outermost closing brace by depth. Block 4 ends with the
//! distinct `-}` terminator instead of a plain closing brace.

/// The raw content of each numbered block, before any header or field
/// decoding. A missing block is simply `None`; no block is required for
/// splitting to succeed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBlocks {
    /// Block 1 content (basic header).
    pub basic: Option<String>,
    /// Block 2 content (application header).
    pub application: Option<String>,
    /// Block 3 content (user header), nested sub-tag groups intact.
    pub user: Option<String>,
    /// Block 4 body (text block), trimmed of surrounding whitespace.
    pub text: Option<String>,
    /// Block 5 content (trailer), nested groups intact.
    pub trailer: Option<String>,
}

/// Split a raw MT103 message into its numbered blocks.
pub fn split_blocks(raw: &str) -> RawBlocks {
    RawBlocks {
        basic: braced_block(raw, 1),
        application: braced_block(raw, 2),
        user: braced_block(raw, 3),
        text: text_block(raw),
        trailer: braced_block(raw, 5),
    }
}

/// Extract the content of `{n:...}`, matching the outermost closing brace.
fn braced_block(raw: &str, n: u8) -> Option<String> {
    let marker = format!("{{{}:", n);
    let start = raw.find(&marker)? + marker.len();
    let mut depth = 1usize;
    for (i, c) in raw[start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(raw[start..start + i].to_owned());
                }
            }
            _ => {}
        }
    }
    // Unterminated block: treat as absent.
    None
}

/// Extract the block 4 body, which runs from `{4:` to the `-}` terminator.
fn text_block(raw: &str) -> Option<String> {
    let start = raw.find("{4:")? + 3;
    let end = start + raw[start..].find("-}")?;
    Some(raw[start..end].trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "{1:F01TESTBANK0XXX0001000001}{2:I103TESTBANK1XXXN}{3:{108:REF-0001}{121:cc0e4a2e-0473-4574-be3b-de639be5252e}}{4:\n:20:TEST-001\n:71A:SHA\n-}{5:{CHK:123456789ABC}}";

    #[test]
    fn splits_all_five_blocks() {
        let blocks = split_blocks(FULL);
        assert_eq!(blocks.basic.as_deref(), Some("F01TESTBANK0XXX0001000001"));
        assert_eq!(blocks.application.as_deref(), Some("I103TESTBANK1XXXN"));
        assert_eq!(
            blocks.user.as_deref(),
            Some("{108:REF-0001}{121:cc0e4a2e-0473-4574-be3b-de639be5252e}")
        );
        assert_eq!(blocks.text.as_deref(), Some(":20:TEST-001\n:71A:SHA"));
        assert_eq!(blocks.trailer.as_deref(), Some("{CHK:123456789ABC}"));
    }

    #[test]
    fn nested_groups_match_outermost_brace() {
        // A naive scan for the first `}` would truncate block 3 after the
        // first sub-tag group.
        let blocks = split_blocks("{3:{113:SEPA}{108:MUR-1}}");
        assert_eq!(blocks.user.as_deref(), Some("{113:SEPA}{108:MUR-1}"));
    }

    #[test]
    fn missing_optional_blocks_are_none() {
        let blocks =
            split_blocks("{1:F01TESTBANK0XXX0001000001}{2:I103TESTBANK1XXXN}{4:\n:20:X\n-}");
        assert!(blocks.basic.is_some());
        assert!(blocks.application.is_some());
        assert!(blocks.user.is_none());
        assert!(blocks.text.is_some());
        assert!(blocks.trailer.is_none());
    }

    #[test]
    fn missing_mandatory_block_is_not_fatal() {
        let blocks = split_blocks("{3:{108:ONLY-USER-HEADER}}");
        assert!(blocks.basic.is_none());
        assert!(blocks.application.is_none());
        assert!(blocks.text.is_none());
        assert_eq!(blocks.user.as_deref(), Some("{108:ONLY-USER-HEADER}"));
    }

    #[test]
    fn text_block_body_is_trimmed() {
        let blocks = split_blocks("{4:\n:20:ABC\n:71A:OUR\n-}");
        assert_eq!(blocks.text.as_deref(), Some(":20:ABC\n:71A:OUR"));
    }

    #[test]
    fn unterminated_block_is_absent() {
        let blocks = split_blocks("{1:F01TESTBANK0XXX0001000001");
        assert!(blocks.basic.is_none());
    }
}
