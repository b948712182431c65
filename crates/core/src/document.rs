//! Record assembler: merges decoded header records and text fields into
//! the canonical document.

use serde::Serialize;

use crate::blocks::{split_blocks, RawBlocks};
use crate::fields::{decode_text_fields, TextFields};
use crate::headers::{
    decode_application_header, decode_basic_header, decode_user_header, ApplicationHeader,
    BasicHeader, UserHeader,
};

/// The canonical parse result: flat header records plus the decoded
/// field tree. Built fresh per parse call and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mt103Document {
    pub basic: Option<BasicHeader>,
    pub application: Option<ApplicationHeader>,
    pub user: Option<UserHeader>,
    pub fields: TextFields,
    /// Block 5 passed through verbatim, not decomposed.
    pub trailer: Option<String>,
}

/// Parse a complete raw MT103 message. Total: a missing or malformed
/// block leaves the corresponding part of the document empty rather
/// than failing.
pub fn parse(raw: &str) -> Mt103Document {
    assemble(&split_blocks(raw))
}

/// Decode each present block and assemble the document.
pub fn assemble(blocks: &RawBlocks) -> Mt103Document {
    Mt103Document {
        basic: blocks.basic.as_deref().and_then(decode_basic_header),
        application: blocks
            .application
            .as_deref()
            .and_then(decode_application_header),
        user: blocks.user.as_deref().map(decode_user_header),
        fields: blocks
            .text
            .as_deref()
            .map(decode_text_fields)
            .unwrap_or_default(),
        trailer: blocks.trailer.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::OrderingCustomer;

    const MESSAGE: &str = "{1:F01TESTBANK0XXX0001000001}{2:I103TESTBANK1XXXN}{4:\n:20:TEST-001\n:23B:CRED\n:32A:240101USD10000,00\n:59:/123456\nBEN NAME\n:71A:SHA\n-}";

    #[test]
    fn end_to_end_scenario() {
        let doc = parse(MESSAGE);

        let basic = doc.basic.expect("basic header");
        assert_eq!(basic.lt_address, "TESTBANK0XXX");

        match doc.application.expect("application header") {
            ApplicationHeader::Input { recipient, .. } => {
                assert_eq!(recipient, "TESTBANK1XXX");
            }
            other => panic!("expected input header, got {:?}", other),
        }

        assert_eq!(doc.fields.transaction_reference.as_deref(), Some("TEST-001"));
        let value = doc.fields.value_date_amount.expect("32A");
        assert_eq!(value.date, "2024-01-01");
        assert_eq!(value.currency, "USD");
        assert_eq!(value.amount, "10000.00");
        let ben = doc.fields.beneficiary.expect("59");
        assert_eq!(ben.account_id.as_deref(), Some("/123456"));
        assert_eq!(ben.name_address.as_deref(), Some("BEN NAME"));
        assert_eq!(doc.fields.details_of_charges.as_deref(), Some("SHA"));

        assert!(doc.user.is_none());
        assert!(doc.trailer.is_none());
    }

    #[test]
    fn parse_is_deterministic() {
        assert_eq!(parse(MESSAGE), parse(MESSAGE));
    }

    #[test]
    fn missing_blocks_produce_incomplete_document() {
        let doc = parse("{4:\n:20:ONLY-TEXT\n-}");
        assert!(doc.basic.is_none());
        assert!(doc.application.is_none());
        assert_eq!(doc.fields.transaction_reference.as_deref(), Some("ONLY-TEXT"));
    }

    #[test]
    fn malformed_header_leaves_fields_intact() {
        let doc = parse("{1:GARBAGE}{4:\n:20:REF-1\n:50K:SOME NAME\n-}");
        assert!(doc.basic.is_none());
        assert_eq!(
            doc.fields.ordering_customer,
            Some(OrderingCustomer::Unstructured("SOME NAME".into()))
        );
    }

    #[test]
    fn empty_input_yields_empty_document() {
        assert_eq!(parse(""), Mt103Document::default());
    }
}
