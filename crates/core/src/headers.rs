//! Header decoders for blocks 1-3 and the block 5 trailer.
//!
//! Blocks 1 and 2 are strict fixed-width layouts validated positionally;
//! any length or character-class mismatch yields `None` rather than an
//! error (lenient policy). Block 3 is a set of optional `{tag:value}`
//! sub-tag groups extracted through an ordered lookup table; only the
//! first occurrence of each sub-tag is honored. The trailer is passed
//! through verbatim by the assembler and has no decoder here.

use serde::Serialize;

/// Block 1 — basic header, fixed-width.
///
/// Layout: `F` + 2-digit service id + 12-character LT address +
/// 4-digit session + 6-digit sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicHeader {
    pub service_id: String,
    pub lt_address: String,
    pub session: String,
    pub sequence_no: String,
}

/// Block 2 — application header, one of two layouts selected by the
/// leading direction letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ApplicationHeader {
    /// `I` direction (message sent to SWIFT): short form.
    Input {
        message_type: String,
        recipient: String,
        priority: String,
    },
    /// `O` direction (message received from SWIFT): long form.
    Output {
        message_type: String,
        input_time: String,
        message_input_reference: String,
        priority: String,
    },
}

/// Block 3 — user header sub-tags. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserHeader {
    /// Sub-tag 108, Message User Reference.
    pub message_user_reference: Option<String>,
    /// Sub-tag 113, bank priority code.
    pub bank_priority_code: Option<String>,
    /// Sub-tag 111, service type identifier.
    pub service_type_identifier: Option<String>,
    /// Sub-tag 121, Unique End-to-end Transaction Reference.
    pub uetr: Option<String>,
}

/// Decode block 1. Returns `None` on any positional mismatch.
pub fn decode_basic_header(content: &str) -> Option<BasicHeader> {
    // F + 2 + 12 + 4 + 6 = 25 characters.
    if !content.is_ascii() || content.len() < 25 || !content.starts_with('F') {
        return None;
    }
    let service_id = &content[1..3];
    let lt_address = &content[3..15];
    let session = &content[15..19];
    let sequence_no = &content[19..25];
    if !all_digits(service_id)
        || !all_upper_alnum(lt_address)
        || !all_digits(session)
        || !all_digits(sequence_no)
    {
        return None;
    }
    Some(BasicHeader {
        service_id: service_id.to_owned(),
        lt_address: lt_address.to_owned(),
        session: session.to_owned(),
        sequence_no: sequence_no.to_owned(),
    })
}

/// Decode block 2. Unknown direction letters yield `None`.
pub fn decode_application_header(content: &str) -> Option<ApplicationHeader> {
    if !content.is_ascii() {
        return None;
    }
    if let Some(rest) = content.strip_prefix('I') {
        // 3-digit message type + 12-char recipient + 1-letter priority.
        if rest.len() < 16 {
            return None;
        }
        let (message_type, recipient, priority) = (&rest[..3], &rest[3..15], &rest[15..16]);
        if !all_digits(message_type) || !all_upper_alnum(recipient) || !all_upper(priority) {
            return None;
        }
        return Some(ApplicationHeader::Input {
            message_type: message_type.to_owned(),
            recipient: recipient.to_owned(),
            priority: priority.to_owned(),
        });
    }
    if let Some(rest) = content.strip_prefix('O') {
        // 3-digit message type + 10-digit input time + 28-char MIR +
        // 1-letter priority. Trailing output date/time characters, when
        // present, are ignored.
        if rest.len() < 42 {
            return None;
        }
        let (message_type, input_time, mir, priority) =
            (&rest[..3], &rest[3..13], &rest[13..41], &rest[41..42]);
        if !all_digits(message_type)
            || !all_digits(input_time)
            || !all_upper_alnum(mir)
            || !all_upper(priority)
        {
            return None;
        }
        return Some(ApplicationHeader::Output {
            message_type: message_type.to_owned(),
            input_time: input_time.to_owned(),
            message_input_reference: mir.to_owned(),
            priority: priority.to_owned(),
        });
    }
    None
}

/// Ordered sub-tag lookup table for block 3. Order is the documented
/// extraction order, not significance.
const USER_SUB_TAGS: [&str; 4] = ["108", "113", "111", "121"];

/// Decode block 3 by independent first-occurrence lookups of each
/// optional sub-tag.
pub fn decode_user_header(content: &str) -> UserHeader {
    let mut header = UserHeader::default();
    for tag in USER_SUB_TAGS {
        let value = sub_tag_value(content, tag).map(str::to_owned);
        match tag {
            "108" => header.message_user_reference = value,
            "113" => header.bank_priority_code = value,
            "111" => header.service_type_identifier = value,
            "121" => header.uetr = value,
            _ => unreachable!(),
        }
    }
    header
}

/// Locate `{tag:` and capture up to the next closing brace. Only the
/// first occurrence is honored.
fn sub_tag_value<'a>(content: &'a str, tag: &str) -> Option<&'a str> {
    let marker = format!("{{{}:", tag);
    let start = content.find(&marker)? + marker.len();
    let end = start + content[start..].find('}')?;
    Some(&content[start..end])
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn all_upper_alnum(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn all_upper(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_uppercase())
}
