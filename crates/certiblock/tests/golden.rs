//! Golden vectors for stored records, keys and selectors.
//!
//! Other readers of the ledger parse these bytes directly, so the exact
//! member names, member order and key formats must not drift.

use certiblock::core::{certificate_key, schema_key, university_key, Selector};
use certiblock::ledger::{Ledger, MemoryLedger};
use certiblock::{new_contract, ContractConfig, NewCertificate};

fn golden_request() -> NewCertificate {
    NewCertificate {
        cert_hash: "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262".into(),
        university_signature: "usig".into(),
        student_signature: "ssig".into(),
        date_of_issuing: "2024-06-30".into(),
        cert_uuid: "123e4567-e89b-12d3-a456-426614174000".into(),
        university_pk: "upk".into(),
        student_pk: "spk".into(),
    }
}

#[tokio::test]
async fn golden_certificate_bytes() {
    let contract = new_contract(MemoryLedger::new(), ContractConfig::default());
    contract.issue_certificate(golden_request()).await.unwrap();

    let stored = contract
        .ledger()
        .get("cert_123e4567-e89b-12d3-a456-426614174000")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        std::str::from_utf8(&stored).unwrap(),
        concat!(
            r#"{"certHash":"af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262","#,
            r#""universitySignature":"usig","studentSignature":"ssig","#,
            r#""dateOfIssuing":"2024-06-30","certNumber":"","#,
            r#""certUUID":"123e4567-e89b-12d3-a456-426614174000","#,
            r#""universityPK":"upk","studentPK":"spk","dataType":"certificate"}"#,
        )
    );
}

#[tokio::test]
async fn golden_university_bytes() {
    let contract = new_contract(MemoryLedger::new(), ContractConfig::default());
    contract
        .register_university("TEDU", "upk", "Ankara", "TED University")
        .await
        .unwrap();

    let stored = contract.ledger().get("uni_TEDU").await.unwrap().unwrap();
    assert_eq!(
        std::str::from_utf8(&stored).unwrap(),
        r#"{"name":"TEDU","publicKey":"upk","location":"Ankara","description":"TED University","dataType":"university"}"#
    );
}

#[tokio::test]
async fn golden_schema_bytes() {
    let contract = new_contract(MemoryLedger::new(), ContractConfig::default());
    contract.init_ledger().await.unwrap();

    let stored = contract.ledger().get("schema_v1").await.unwrap().unwrap();
    assert_eq!(
        std::str::from_utf8(&stored).unwrap(),
        r#"{"certificateType":"Bachelor","id":"v1","ordering":["universityName","major","departmentName","cgpa"],"dataType":"schema"}"#
    );
}

#[test]
fn golden_keys() {
    assert_eq!(
        certificate_key("123e4567-e89b-12d3-a456-426614174000"),
        "cert_123e4567-e89b-12d3-a456-426614174000"
    );
    assert_eq!(university_key("TEDU"), "uni_TEDU");
    assert_eq!(schema_key("v1"), "schema_v1");
}

#[test]
fn golden_selectors() {
    assert_eq!(
        Selector::certificates().to_query_string().unwrap(),
        r#"{"selector":{"dataType":"certificate"}}"#
    );
    assert_eq!(
        Selector::certificates_by_student("spk")
            .to_query_string()
            .unwrap(),
        r#"{"selector":{"dataType":"certificate","studentPK":"spk"}}"#
    );
    assert_eq!(
        Selector::certificates_by_university("upk")
            .to_query_string()
            .unwrap(),
        r#"{"selector":{"dataType":"certificate","universityPK":"upk"}}"#
    );
}
