//! JSON serialization pass: canonical document to the legacy output
//! shape consumed by downstream tooling.
//!
//! The root object is `{"MT103": {...}}` with flat header keys, the `A`
//! field group, and the verbatim `Trailer`. Repeatable field groups
//! (`A1` for 13C, `A3` for 71F) apply the singleton collapse here: a
//! single occurrence serializes as one object, several occurrences as an
//! ordered array. Keys serialize in sorted order.

use serde_json::{json, Map, Value};

use crate::document::Mt103Document;
use crate::fields::{CurrencyAmount, OrderingCustomer, TextFields, TimeIndication};
use crate::headers::ApplicationHeader;

/// Serialize a parsed document. Absent fields contribute no keys.
pub fn to_json(doc: &Mt103Document) -> Value {
    let mut root = Map::new();

    if let Some(basic) = &doc.basic {
        root.insert("Application_Id".to_owned(), json!("F"));
        root.insert("Service_Id".to_owned(), json!(basic.service_id));
        root.insert("LT_Address".to_owned(), json!(basic.lt_address));
        root.insert("Session".to_owned(), json!(basic.session));
        root.insert("Sequence_No".to_owned(), json!(basic.sequence_no));
    }

    match &doc.application {
        Some(ApplicationHeader::Input {
            message_type,
            recipient,
            priority,
        }) => {
            root.insert("IO_ID".to_owned(), json!("I"));
            root.insert("MT".to_owned(), json!(message_type));
            root.insert("Recipient".to_owned(), json!(recipient));
            root.insert("Message_Priority".to_owned(), json!(priority));
        }
        Some(ApplicationHeader::Output {
            message_type,
            input_time,
            message_input_reference,
            priority,
        }) => {
            root.insert("IO_ID".to_owned(), json!("O"));
            root.insert("MT".to_owned(), json!(message_type));
            root.insert("Input_Time".to_owned(), json!(input_time));
            root.insert("MIR".to_owned(), json!(message_input_reference));
            root.insert("Message_Priority".to_owned(), json!(priority));
        }
        None => {}
    }

    if let Some(user) = &doc.user {
        insert_opt(&mut root, "MUR", &user.message_user_reference);
        insert_opt(&mut root, "Bank_Priority_Code", &user.bank_priority_code);
        insert_opt(
            &mut root,
            "Service_Type_Identifier",
            &user.service_type_identifier,
        );
        insert_opt(
            &mut root,
            "UniqueEndToEndTransactionReference_121",
            &user.uetr,
        );
    }

    let fields = fields_json(&doc.fields);
    if !fields.is_empty() {
        root.insert("A".to_owned(), Value::Object(fields));
    }

    if let Some(trailer) = &doc.trailer {
        root.insert("Trailer".to_owned(), json!(trailer));
    }

    json!({ "MT103": Value::Object(root) })
}

fn fields_json(f: &TextFields) -> Map<String, Value> {
    let mut a = Map::new();

    if let Some(v) = &f.transaction_reference {
        a.insert("F20".to_owned(), json!({ "F20_TRN": v }));
    }
    if !f.time_indications.is_empty() {
        let occurrences: Vec<Value> = f.time_indications.iter().map(time_indication).collect();
        a.insert("A1".to_owned(), json!({ "F13C": collapse(occurrences) }));
    }
    if let Some(v) = &f.bank_operation_code {
        a.insert("F23B".to_owned(), json!({ "F23B_BankOpCode": v }));
    }
    if let Some(v) = &f.instruction_code {
        a.insert("F23E".to_owned(), json!({ "F23E_InstructionCode": v }));
    }
    if let Some(v) = &f.transaction_type_code {
        a.insert("F26T".to_owned(), json!({ "F26T_TransType": v }));
    }
    if let Some(v) = &f.value_date_amount {
        a.insert(
            "F32A".to_owned(),
            json!({
                "F32A_Date": v.date,
                "F32A_Curr": v.currency,
                "F32A_Amount": v.amount,
            }),
        );
    }
    if let Some(v) = &f.original_amount {
        a.insert(
            "F33B".to_owned(),
            json!({ "F33B_Curr": v.currency, "F33B_Amount": v.amount }),
        );
    }
    if let Some(v) = &f.exchange_rate {
        a.insert("F36".to_owned(), json!({ "F36_ExchangeRate": v }));
    }
    match &f.ordering_customer {
        Some(OrderingCustomer::Structured(p)) => {
            let mut m = Map::new();
            m.insert(
                "F50F_PartyIdentifier".to_owned(),
                json!(p.party_identifier),
            );
            if let Some(rest) = &p.name_address {
                m.insert("F50F_NameAddr".to_owned(), json!(rest));
            }
            a.insert("F50F".to_owned(), Value::Object(m));
        }
        Some(OrderingCustomer::Unstructured(v)) => {
            a.insert("F50K".to_owned(), json!({ "F50K_OrderingCustomer": v }));
        }
        None => {}
    }
    if let Some(v) = &f.sending_institution {
        a.insert("F51A".to_owned(), json!({ "F51A_SendingInstitution": v }));
    }
    if let Some(v) = &f.ordering_institution_bic {
        a.insert("F52A".to_owned(), json!({ "F52A_BIC": v }));
    }
    if let Some(p) = &f.ordering_institution {
        let mut m = Map::new();
        insert_opt(&mut m, "F52D_AccountId", &p.account_id);
        insert_opt(&mut m, "F52D_NameAddr", &p.name_address);
        a.insert("F52D".to_owned(), Value::Object(m));
    }
    if let Some(v) = &f.senders_correspondent {
        a.insert("F53B".to_owned(), json!({ "F53B_Account": v }));
    }
    if let Some(p) = &f.receivers_correspondent {
        let mut m = Map::new();
        insert_opt(&mut m, "F54A_AccountId", &p.account_id);
        insert_opt(&mut m, "F54A_BIC", &p.name_address);
        a.insert("F54A".to_owned(), Value::Object(m));
    }
    if let Some(i) = &f.intermediary {
        let mut m = Map::new();
        m.insert(format!("F56{}_Intermediary", i.suffix), json!(i.value));
        a.insert(format!("F56{}", i.suffix), Value::Object(m));
    }
    if let Some(i) = &f.account_with_institution {
        let mut m = Map::new();
        m.insert(
            format!("F57{}_AccountWithInstitution", i.suffix),
            json!(i.value),
        );
        a.insert(format!("F57{}", i.suffix), Value::Object(m));
    }
    if let Some(p) = &f.beneficiary {
        let mut m = Map::new();
        insert_opt(&mut m, "F59_ACC_ID_Party", &p.account_id);
        insert_opt(&mut m, "F59_Name_addr_Party", &p.name_address);
        a.insert("F59".to_owned(), Value::Object(m));
    }
    if let Some(v) = &f.remittance_information {
        a.insert("F70".to_owned(), json!({ "F70_PaymentDetails": v }));
    }
    if let Some(v) = &f.details_of_charges {
        a.insert("F71A".to_owned(), json!({ "F71A_ChargesCode": v }));
    }
    if !f.senders_charges.is_empty() {
        let occurrences: Vec<Value> = f.senders_charges.iter().map(senders_charge).collect();
        a.insert("A3".to_owned(), json!({ "F71F": collapse(occurrences) }));
    }
    if let Some(v) = &f.receivers_charges {
        a.insert("F71G".to_owned(), json!({ "F71G_ReceiverCharges": v }));
    }
    if let Some(v) = &f.sender_to_receiver {
        a.insert("F72".to_owned(), json!({ "F72_General": v }));
    }
    if let Some(v) = &f.regulatory_reporting {
        a.insert("F77B".to_owned(), json!({ "F77B_Narrative": v }));
    }

    a
}

fn time_indication(t: &TimeIndication) -> Value {
    json!({
        "F13C_Code": t.code,
        "F13C_Time": t.time,
        "F13C_Sign": t.sign,
        "F13C_Offset": t.offset,
    })
}

fn senders_charge(c: &CurrencyAmount) -> Value {
    json!({ "F71F_Curr": c.currency, "F71F_Amount": c.amount })
}

/// Singleton collapse for repeatable groups: one occurrence is an
/// object, several are an ordered array.
fn collapse(mut occurrences: Vec<Value>) -> Value {
    if occurrences.len() == 1 {
        occurrences.remove(0)
    } else {
        Value::Array(occurrences)
    }
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        map.insert(key.to_owned(), json!(v));
    }
}
