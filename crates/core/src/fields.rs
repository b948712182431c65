//! Per-tag decoders for the block 4 text fields.
//!
//! Each tag present in the segmented body is dispatched to its decoding
//! rule. A decoder returns [`Decoded::Matched`] with a typed record or
//! [`Decoded::Malformed`] when the raw span does not fit the tag's
//! grammar; malformed fields collapse to an absent key at the
//! serialization boundary, indistinguishable there from a tag that never
//! occurred. Repeatable tags (13C, 71F) accumulate into ordered lists;
//! the object-vs-list output shape is applied later, in serialization.

use serde::Serialize;

use crate::segment::{segment_fields, FieldSpan};

/// Outcome of decoding one raw span. A tag that never occurs simply
/// never reaches its decoder, which is the third (absent) state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    Matched(T),
    Malformed,
}

impl<T> Decoded<T> {
    fn ok(self) -> Option<T> {
        match self {
            Decoded::Matched(v) => Some(v),
            Decoded::Malformed => None,
        }
    }
}

/// Tag 13C occurrence: `/CODE/HHMM±HHMM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeIndication {
    pub code: String,
    /// `HH:MM:00`
    pub time: String,
    /// `+` or `-`
    pub sign: String,
    /// UTC offset as `HH:MM:00`
    pub offset: String,
}

/// Tag 32A: value date, currency, settlement amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueDateAmount {
    /// ISO date, century-pivoted from the two-digit year.
    pub date: String,
    pub currency: String,
    /// Dot-decimal amount.
    pub amount: String,
}

/// Currency + amount pair (tags 33B, 71F).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyAmount {
    pub currency: String,
    /// Dot-decimal amount.
    pub amount: String,
}

/// Tag 50F: structured ordering customer. The numbered sub-lines after
/// the party identifier are kept verbatim as one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredParty {
    pub party_identifier: String,
    pub name_address: Option<String>,
}

/// Account-id / name-address split shared by tags 52D, 54A and 59: when
/// the first line starts with `/` it is the account identifier and the
/// remaining lines are the name and address, otherwise the whole block
/// is the name and address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountParty {
    pub account_id: Option<String>,
    pub name_address: Option<String>,
}

/// Ordering customer: 50F when present, otherwise 50K.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OrderingCustomer {
    Structured(StructuredParty),
    Unstructured(String),
}

/// Suffixed institution field (56A/C/D, 57A/B/C/D): the winning suffix
/// and its verbatim value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuffixedInstitution {
    pub suffix: char,
    pub value: String,
}

/// All decoded block 4 fields. Every field is optional; repeatable tags
/// are plain vectors in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextFields {
    /// 20 — transaction reference number.
    pub transaction_reference: Option<String>,
    /// 13C — time indications, repeatable.
    pub time_indications: Vec<TimeIndication>,
    /// 23B — bank operation code.
    pub bank_operation_code: Option<String>,
    /// 23E — instruction code.
    pub instruction_code: Option<String>,
    /// 26T — transaction type code.
    pub transaction_type_code: Option<String>,
    /// 32A — value date / currency / settled amount.
    pub value_date_amount: Option<ValueDateAmount>,
    /// 33B — currency / original ordered amount.
    pub original_amount: Option<CurrencyAmount>,
    /// 36 — exchange rate.
    pub exchange_rate: Option<String>,
    /// 50F or 50K — ordering customer.
    pub ordering_customer: Option<OrderingCustomer>,
    /// 51A — sending institution BIC.
    pub sending_institution: Option<String>,
    /// 52A — ordering institution BIC.
    pub ordering_institution_bic: Option<String>,
    /// 52D — ordering institution, name and address form.
    pub ordering_institution: Option<AccountParty>,
    /// 53B — sender's correspondent account.
    pub senders_correspondent: Option<String>,
    /// 54A — receiver's correspondent.
    pub receivers_correspondent: Option<AccountParty>,
    /// 56A/C/D — intermediary institution, first suffix in precedence.
    pub intermediary: Option<SuffixedInstitution>,
    /// 57A/B/C/D — account-with institution, first suffix in precedence.
    pub account_with_institution: Option<SuffixedInstitution>,
    /// 59 — beneficiary customer.
    pub beneficiary: Option<AccountParty>,
    /// 70 — remittance information, multi-line verbatim.
    pub remittance_information: Option<String>,
    /// 71A — details of charges code.
    pub details_of_charges: Option<String>,
    /// 71F — sender's charges, repeatable.
    pub senders_charges: Vec<CurrencyAmount>,
    /// 71G — receiver's charges.
    pub receivers_charges: Option<String>,
    /// 72 — sender to receiver information, multi-line verbatim.
    pub sender_to_receiver: Option<String>,
    /// 77B — regulatory reporting, multi-line verbatim.
    pub regulatory_reporting: Option<String>,
}

/// Suffix precedence for tag 56 (intermediary institution).
const INTERMEDIARY_SUFFIXES: [char; 3] = ['A', 'C', 'D'];
/// Suffix precedence for tag 57 (account-with institution).
const ACCOUNT_WITH_SUFFIXES: [char; 4] = ['A', 'B', 'C', 'D'];

/// Segment a block 4 body and decode every recognized tag. Unknown tags
/// are ignored; for non-repeatable tags the first occurrence wins.
pub fn decode_text_fields(body: &str) -> TextFields {
    let spans = segment_fields(body);
    let mut fields = TextFields::default();

    // Textual presence of 50F anywhere in the body suppresses 50K,
    // regardless of whether the 50F span itself decodes.
    let has_50f = spans.iter().any(|s| s.tag == "50F");

    for span in &spans {
        let value = span.value.as_str();
        match span.tag.as_str() {
            "20" => set_once(&mut fields.transaction_reference, decode_token(value)),
            "13C" => {
                if let Decoded::Matched(t) = decode_time_indication(value) {
                    fields.time_indications.push(t);
                }
            }
            "23B" => set_once(&mut fields.bank_operation_code, decode_token(value)),
            "23E" => set_once(&mut fields.instruction_code, decode_scalar(value)),
            "26T" => set_once(&mut fields.transaction_type_code, decode_scalar(value)),
            "32A" => set_once(&mut fields.value_date_amount, decode_value_date_amount(value)),
            "33B" => set_once(&mut fields.original_amount, decode_currency_amount(value)),
            "36" => set_once(&mut fields.exchange_rate, decode_rate(value)),
            "50F" => {
                let decoded = decode_structured_party(value)
                    .ok()
                    .map(OrderingCustomer::Structured);
                if fields.ordering_customer.is_none() {
                    fields.ordering_customer = decoded;
                }
            }
            "50K" if !has_50f => {
                let decoded = decode_scalar(value).ok().map(OrderingCustomer::Unstructured);
                if fields.ordering_customer.is_none() {
                    fields.ordering_customer = decoded;
                }
            }
            "51A" => set_once(&mut fields.sending_institution, decode_scalar(value)),
            "52A" => set_once(&mut fields.ordering_institution_bic, decode_scalar(value)),
            "52D" => set_once(&mut fields.ordering_institution, decode_account_party(value)),
            "53B" => set_once(&mut fields.senders_correspondent, decode_scalar(value)),
            "54A" => set_once(&mut fields.receivers_correspondent, decode_account_party(value)),
            // The optional letter option of 59 carries no extra structure.
            "59" | "59A" => set_once(&mut fields.beneficiary, decode_account_party(value)),
            "70" => set_once(&mut fields.remittance_information, decode_scalar(value)),
            "71A" => set_once(&mut fields.details_of_charges, decode_token(value)),
            "71F" => {
                if let Decoded::Matched(c) = decode_currency_amount(value) {
                    fields.senders_charges.push(c);
                }
            }
            "71G" => set_once(&mut fields.receivers_charges, decode_scalar(value)),
            "72" => set_once(&mut fields.sender_to_receiver, decode_scalar(value)),
            "77B" => set_once(&mut fields.regulatory_reporting, decode_scalar(value)),
            _ => {}
        }
    }

    fields.intermediary = pick_suffixed(&spans, "56", &INTERMEDIARY_SUFFIXES);
    fields.account_with_institution = pick_suffixed(&spans, "57", &ACCOUNT_WITH_SUFFIXES);
    fields
}

/// Resolve a suffixed field group by fixed precedence: the first suffix
/// present in the body wins and the rest are ignored, even when the
/// winning span turns out malformed.
fn pick_suffixed(
    spans: &[FieldSpan],
    base: &str,
    precedence: &[char],
) -> Option<SuffixedInstitution> {
    for &suffix in precedence {
        let tag = format!("{}{}", base, suffix);
        if let Some(span) = spans.iter().find(|s| s.tag == tag) {
            return decode_scalar(&span.value)
                .ok()
                .map(|value| SuffixedInstitution { suffix, value });
        }
    }
    None
}

fn set_once<T>(slot: &mut Option<T>, decoded: Decoded<T>) {
    if slot.is_none() {
        *slot = decoded.ok();
    }
}

// ── Grammar decoders ─────────────────────────────────────────────────

/// Single token: trimmed value up to the first whitespace.
fn decode_token(value: &str) -> Decoded<String> {
    match value.split_whitespace().next() {
        Some(token) => Decoded::Matched(token.to_owned()),
        None => Decoded::Malformed,
    }
}

/// Trimmed pass-through, multi-line values kept verbatim.
fn decode_scalar(value: &str) -> Decoded<String> {
    let v = value.trim();
    if v.is_empty() {
        Decoded::Malformed
    } else {
        Decoded::Matched(v.to_owned())
    }
}

/// `/CODE/HHMM±HHMM` → code, `HH:MM:00` time, sign, `HH:MM:00` offset.
fn decode_time_indication(value: &str) -> Decoded<TimeIndication> {
    let v = value.trim();
    let Some(rest) = v.strip_prefix('/') else {
        return Decoded::Malformed;
    };
    let Some(slash) = rest.find('/') else {
        return Decoded::Malformed;
    };
    let (code, tail) = (&rest[..slash], &rest[slash + 1..]);
    if code.is_empty() || !tail.is_ascii() || tail.len() < 9 {
        return Decoded::Malformed;
    }
    let (time, sign, offset) = (&tail[..4], &tail[4..5], &tail[5..9]);
    if !all_digits(time) || !matches!(sign, "+" | "-") || !all_digits(offset) {
        return Decoded::Malformed;
    }
    Decoded::Matched(TimeIndication {
        code: code.to_owned(),
        time: clock(time),
        sign: sign.to_owned(),
        offset: clock(offset),
    })
}

/// `YYMMDD CCY amount` → ISO date, currency, dot-decimal amount.
fn decode_value_date_amount(value: &str) -> Decoded<ValueDateAmount> {
    let v = value.trim();
    if !v.is_ascii() || v.len() < 10 {
        return Decoded::Malformed;
    }
    let (date, currency, amount) = (&v[..6], &v[6..9], &v[9..]);
    if !all_digits(date) || !all_upper(currency) || !comma_decimal(amount) {
        return Decoded::Malformed;
    }
    Decoded::Matched(ValueDateAmount {
        date: pivot_date(date),
        currency: currency.to_owned(),
        amount: amount.replace(',', "."),
    })
}

/// `CCY amount` → currency, dot-decimal amount (tags 33B, 71F).
fn decode_currency_amount(value: &str) -> Decoded<CurrencyAmount> {
    let v = value.trim();
    if !v.is_ascii() || v.len() < 4 {
        return Decoded::Malformed;
    }
    let (currency, amount) = (&v[..3], &v[3..]);
    if !all_upper(currency) || !comma_decimal(amount) {
        return Decoded::Malformed;
    }
    Decoded::Matched(CurrencyAmount {
        currency: currency.to_owned(),
        amount: amount.replace(',', "."),
    })
}

/// Exchange rate: comma-decimal number, dot-decimal out.
fn decode_rate(value: &str) -> Decoded<String> {
    let v = value.trim();
    if !comma_decimal(v) {
        return Decoded::Malformed;
    }
    Decoded::Matched(v.replace(',', "."))
}

/// 50F: first line is the party identifier, remaining lines stay as one
/// verbatim block (numbered sub-lines are not decomposed).
fn decode_structured_party(value: &str) -> Decoded<StructuredParty> {
    let v = value.trim();
    if v.is_empty() {
        return Decoded::Malformed;
    }
    match v.split_once('\n') {
        Some((first, rest)) => Decoded::Matched(StructuredParty {
            party_identifier: first.to_owned(),
            name_address: Some(rest.to_owned()),
        }),
        None => Decoded::Matched(StructuredParty {
            party_identifier: v.to_owned(),
            name_address: None,
        }),
    }
}

/// Shared 52D/54A/59 split: leading `/` line is the account id.
fn decode_account_party(value: &str) -> Decoded<AccountParty> {
    let v = value.trim();
    if v.is_empty() {
        return Decoded::Malformed;
    }
    if v.starts_with('/') {
        let (account, rest) = match v.split_once('\n') {
            Some((first, rest)) => (first, Some(rest)),
            None => (v, None),
        };
        Decoded::Matched(AccountParty {
            account_id: Some(account.to_owned()),
            name_address: rest.map(str::to_owned),
        })
    } else {
        Decoded::Matched(AccountParty {
            account_id: None,
            name_address: Some(v.to_owned()),
        })
    }
}

/// `HHMM` → `HH:MM:00`.
fn clock(hhmm: &str) -> String {
    format!("{}:{}:00", &hhmm[..2], &hhmm[2..4])
}

/// Two-digit year pivot: 00-50 land in 20xx, 51-99 in 19xx.
fn pivot_date(yymmdd: &str) -> String {
    let yy: u32 = yymmdd[..2].parse().unwrap_or(0);
    let century = if yy <= 50 { 2000 } else { 1900 };
    format!("{}-{}-{}", century + yy, &yymmdd[2..4], &yymmdd[4..6])
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn all_upper(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_uppercase())
}

/// Digits with comma decimal separators, as amounts and rates appear on
/// the wire.
fn comma_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || b == b',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_century_pivot() {
        let cases = [
            ("091120USD1,00", "2009-11-20"),
            ("991231USD1,00", "1999-12-31"),
            ("500101USD1,00", "2050-01-01"),
            ("510101USD1,00", "1951-01-01"),
        ];
        for (raw, want) in cases {
            match decode_value_date_amount(raw) {
                Decoded::Matched(v) => assert_eq!(v.date, want, "input {}", raw),
                Decoded::Malformed => panic!("{} should decode", raw),
            }
        }
    }

    #[test]
    fn amount_comma_becomes_dot() {
        match decode_value_date_amount("240101USD15000,11") {
            Decoded::Matched(v) => {
                assert_eq!(v.currency, "USD");
                assert_eq!(v.amount, "15000.11");
            }
            Decoded::Malformed => panic!("should decode"),
        }
        match decode_currency_amount("EUR100,00") {
            Decoded::Matched(c) => assert_eq!(c.amount, "100.00"),
            Decoded::Malformed => panic!("should decode"),
        }
    }

    #[test]
    fn malformed_value_date_amount() {
        assert_eq!(decode_value_date_amount("BADDATE"), Decoded::Malformed);
        assert_eq!(decode_value_date_amount("24010USD1,00"), Decoded::Malformed);
        assert_eq!(decode_value_date_amount("240101usd1,00"), Decoded::Malformed);
        assert_eq!(decode_value_date_amount("240101USD"), Decoded::Malformed);
    }

    #[test]
    fn time_indication_decodes_clock_and_offset() {
        match decode_time_indication("/CLSTIME/0945+0100") {
            Decoded::Matched(t) => {
                assert_eq!(t.code, "CLSTIME");
                assert_eq!(t.time, "09:45:00");
                assert_eq!(t.sign, "+");
                assert_eq!(t.offset, "01:00:00");
            }
            Decoded::Malformed => panic!("should decode"),
        }
        assert_eq!(decode_time_indication("/CLSTIME/4545"), Decoded::Malformed);
        assert_eq!(decode_time_indication("CLSTIME"), Decoded::Malformed);
    }

    #[test]
    fn repeatable_13c_preserves_encounter_order() {
        let f = decode_text_fields(":13C:/CLSTIME/0945+0100\n:13C:/RNCTIME/1030-0500");
        assert_eq!(f.time_indications.len(), 2);
        assert_eq!(f.time_indications[0].code, "CLSTIME");
        assert_eq!(f.time_indications[1].code, "RNCTIME");
        assert_eq!(f.time_indications[1].sign, "-");
    }

    #[test]
    fn fifty_f_presence_suppresses_fifty_k() {
        let body = ":50F:/123456\n1/ACME CORP\n:50K:/999\nOTHER NAME";
        let f = decode_text_fields(body);
        match f.ordering_customer {
            Some(OrderingCustomer::Structured(ref p)) => {
                assert_eq!(p.party_identifier, "/123456");
                assert_eq!(p.name_address.as_deref(), Some("1/ACME CORP"));
            }
            other => panic!("expected structured customer, got {:?}", other),
        }
    }

    #[test]
    fn fifty_k_used_when_fifty_f_absent() {
        let f = decode_text_fields(":50K:/999\nOTHER NAME\nLONDON");
        assert_eq!(
            f.ordering_customer,
            Some(OrderingCustomer::Unstructured("/999\nOTHER NAME\nLONDON".into()))
        );
    }

    #[test]
    fn suffix_precedence_56a_beats_56d() {
        // 56D appears first in the body; precedence still picks 56A.
        let f = decode_text_fields(":56D:SOME BANK\nPARIS\n:56A:BANKFRPP");
        let i = f.intermediary.expect("intermediary");
        assert_eq!(i.suffix, 'A');
        assert_eq!(i.value, "BANKFRPP");
    }

    #[test]
    fn suffix_precedence_57_falls_through_to_present_suffix() {
        let f = decode_text_fields(":57C://SC123456");
        let a = f.account_with_institution.expect("account with institution");
        assert_eq!(a.suffix, 'C');
        assert_eq!(a.value, "//SC123456");
    }

    #[test]
    fn account_party_split_variants() {
        match decode_account_party("/123456\nBEN NAME\nLONDON") {
            Decoded::Matched(p) => {
                assert_eq!(p.account_id.as_deref(), Some("/123456"));
                assert_eq!(p.name_address.as_deref(), Some("BEN NAME\nLONDON"));
            }
            Decoded::Malformed => panic!("should decode"),
        }
        match decode_account_party("PLAIN BANK NAME\nZURICH") {
            Decoded::Matched(p) => {
                assert!(p.account_id.is_none());
                assert_eq!(p.name_address.as_deref(), Some("PLAIN BANK NAME\nZURICH"));
            }
            Decoded::Malformed => panic!("should decode"),
        }
        match decode_account_party("/31902177312") {
            Decoded::Matched(p) => {
                assert_eq!(p.account_id.as_deref(), Some("/31902177312"));
                assert!(p.name_address.is_none());
            }
            Decoded::Malformed => panic!("should decode"),
        }
    }

    #[test]
    fn first_occurrence_wins_for_non_repeatable_tags() {
        let f = decode_text_fields(":20:FIRST-REF\n:20:SECOND-REF");
        assert_eq!(f.transaction_reference.as_deref(), Some("FIRST-REF"));
    }

    #[test]
    fn malformed_fields_are_simply_absent() {
        let f = decode_text_fields(":20:\n:32A:NOTADATE\n:71A:SHA");
        assert!(f.transaction_reference.is_none());
        assert!(f.value_date_amount.is_none());
        assert_eq!(f.details_of_charges.as_deref(), Some("SHA"));
    }

    #[test]
    fn exchange_rate_comma_substitution() {
        assert_eq!(decode_rate("1,2345"), Decoded::Matched("1.2345".into()));
        assert_eq!(decode_rate("ABC"), Decoded::Malformed);
    }
}
