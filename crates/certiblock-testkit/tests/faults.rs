//! Contract behavior when the ledger fails.

use certiblock::core::Selector;
use certiblock::{new_contract, CertContract, ContractConfig, ContractError, WritePolicy};
use certiblock_testkit::{FaultyLedger, TestFixture};

fn contract() -> CertContract<FaultyLedger> {
    new_contract(FaultyLedger::new(), ContractConfig::default())
}

#[tokio::test]
async fn failed_write_surfaces_and_leaves_state_untouched() {
    let fixture = TestFixture::new();
    let contract = contract();
    contract.ledger().fail_put(true);

    let request = fixture.certificate_request("c1", b"diploma");
    assert!(matches!(
        contract.issue_certificate(request).await,
        Err(ContractError::Write { .. })
    ));
    assert!(matches!(
        contract.register_university("TEDU", "pk", "Ankara", "").await,
        Err(ContractError::Write { .. })
    ));
    assert!(matches!(
        contract.init_ledger().await,
        Err(ContractError::Write { .. })
    ));

    assert!(contract.ledger().inner().is_empty().unwrap());
    assert_eq!(contract.ledger().puts(), 0);
}

#[tokio::test]
async fn failed_read_is_not_reported_as_missing() {
    let contract = contract();
    contract
        .register_university("TEDU", "pk", "Ankara", "")
        .await
        .unwrap();
    contract.ledger().fail_get(true);

    assert!(matches!(
        contract.query_university_profile_by_name("TEDU").await,
        Err(ContractError::Read { .. })
    ));
    assert!(matches!(
        contract.query_certificate_by_uuid("missing").await,
        Err(ContractError::Read { .. })
    ));
}

#[tokio::test]
async fn reject_existing_needs_a_working_read() {
    let contract = new_contract(
        FaultyLedger::new(),
        ContractConfig {
            write_policy: WritePolicy::RejectExisting,
            ..ContractConfig::default()
        },
    );
    contract.ledger().fail_get(true);

    assert!(matches!(
        contract.register_university("TEDU", "pk", "Ankara", "").await,
        Err(ContractError::Read { .. })
    ));
    assert_eq!(contract.ledger().puts(), 0);
}

#[tokio::test]
async fn failed_query_surfaces_with_its_selector() {
    let contract = contract();
    contract.ledger().fail_query(true);

    match contract.get_all_certificate_by_student("alice").await {
        Err(ContractError::Query { selector, .. }) => {
            assert_eq!(
                selector,
                Selector::certificates_by_student("alice")
                    .to_query_string()
                    .unwrap()
            );
        }
        other => panic!("expected Query error, got {other:?}"),
    }
    assert!(matches!(
        contract.query_all().await,
        Err(ContractError::Query { .. })
    ));
}

#[tokio::test]
async fn iteration_fault_fails_the_whole_query_and_releases() {
    let fixture = TestFixture::new();
    let contract = contract();
    for uuid in ["c1", "c2", "c3"] {
        contract
            .issue_certificate(fixture.certificate_request(uuid, uuid.as_bytes()))
            .await
            .unwrap();
    }

    contract.ledger().fail_iteration_after(Some(1));
    assert!(matches!(
        contract.query_all().await,
        Err(ContractError::Query { .. })
    ));
    assert_eq!(contract.ledger().inner().open_iterators(), 0);

    contract.ledger().fail_iteration_after(None);
    assert_eq!(contract.query_all().await.unwrap().len(), 3);
    assert_eq!(contract.ledger().inner().open_iterators(), 0);
}

#[tokio::test]
async fn sqlite_file_ledger_with_fixture_parties() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("certs.db");
    let fixture = TestFixture::with_seeds([1; 32], [2; 32]);

    let request = fixture.certificate_request("c1", b"diploma");
    {
        let contract = new_contract(
            certiblock::ledger::SqliteLedger::open(&path).unwrap(),
            ContractConfig::default(),
        );
        contract.issue_certificate(request.clone()).await.unwrap();
    }

    let contract = new_contract(
        certiblock::ledger::SqliteLedger::open(&path).unwrap(),
        ContractConfig::default(),
    );
    let by_student = contract
        .get_all_certificate_by_student(&fixture.student.public_key())
        .await
        .unwrap();
    assert_eq!(by_student.len(), 1);
    assert_eq!(by_student[0].cert_hash, request.cert_hash);
    assert!(certiblock_testkit::verify_signature(
        &by_student[0].student_pk,
        by_student[0].cert_hash.as_bytes(),
        &by_student[0].student_signature,
    ));
}
