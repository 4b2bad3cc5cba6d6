//! The certificate contract: record operations over a shared ledger.
//!
//! Each operation is one logical transaction against the ledger: zero or
//! more reads and at most one write. Nothing is retried, cached, or
//! partially applied here. Ordering and isolation across concurrent
//! invocations are the ledger's business.

use std::sync::Arc;

use certiblock_core::{
    Certificate, DataType, NewCertificate, Record, Schema, Selector, University,
};
use certiblock_ledger::Ledger;

use crate::error::{ContractError, Result};

/// What to do when a write targets a key that already holds a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Replace the stored record without complaint.
    #[default]
    Overwrite,
    /// Fail with [`ContractError::AlreadyExists`] and leave the stored record alone.
    RejectExisting,
}

/// Configuration for the contract.
#[derive(Debug, Clone)]
pub struct ContractConfig {
    /// Name the contract is registered under with the host.
    pub name: String,
    /// Behavior of certificate issuance and university registration on an
    /// occupied key. Ledger initialization always overwrites.
    pub write_policy: WritePolicy,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            name: "certiblock".to_string(),
            write_policy: WritePolicy::Overwrite,
        }
    }
}

/// The certificate contract.
///
/// Holds the ledger it operates on; there is no other state.
pub struct CertContract<L: Ledger> {
    ledger: Arc<L>,
    config: ContractConfig,
}

/// Build a contract over `ledger`.
pub fn new_contract<L: Ledger>(ledger: L, config: ContractConfig) -> CertContract<L> {
    CertContract::new(ledger, config)
}

impl<L: Ledger> CertContract<L> {
    /// Create a contract that owns its ledger.
    pub fn new(ledger: L, config: ContractConfig) -> Self {
        Self::with_shared(Arc::new(ledger), config)
    }

    /// Create a contract over a ledger shared with other components.
    pub fn with_shared(ledger: Arc<L>, config: ContractConfig) -> Self {
        Self { ledger, config }
    }

    /// Get the ledger reference.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Get the configuration.
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Write the `Bachelor`/`v1` certificate schema and return it.
    ///
    /// Calling this again rewrites the same content.
    pub async fn init_ledger(&self) -> Result<Schema> {
        tracing::info!(contract = %self.config.name, "initializing ledger");

        let schema = Schema::bachelor_v1();
        self.write_record(&schema, WritePolicy::Overwrite).await?;
        Ok(schema)
    }

    /// Issue a certificate under `cert_<certUUID>` and return it.
    ///
    /// The certificate number is left empty. Under the default policy an
    /// existing certificate with the same UUID is replaced.
    pub async fn issue_certificate(&self, request: NewCertificate) -> Result<Certificate> {
        tracing::info!(
            cert_uuid = %request.cert_uuid,
            university_pk = %request.university_pk,
            "issuing certificate"
        );

        let certificate = Certificate::issue(request);
        self.write_record(&certificate, self.config.write_policy)
            .await?;
        Ok(certificate)
    }

    /// Register a university profile under `uni_<name>` and return it.
    pub async fn register_university(
        &self,
        name: &str,
        public_key: &str,
        location: &str,
        description: &str,
    ) -> Result<University> {
        tracing::info!(name, "registering university");

        let university = University::new(name, public_key, location, description);
        self.write_record(&university, self.config.write_policy)
            .await?;
        Ok(university)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Point Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up a university profile by name.
    pub async fn query_university_profile_by_name(&self, name: &str) -> Result<University> {
        tracing::debug!(name, "querying university profile");
        self.read_record(name).await
    }

    /// Look up a certificate schema by version.
    pub async fn query_certificate_schema(&self, version: &str) -> Result<Schema> {
        tracing::debug!(version, "querying certificate schema");
        self.read_record(version).await
    }

    /// Look up a certificate by UUID.
    pub async fn query_certificate_by_uuid(&self, uuid: &str) -> Result<Certificate> {
        tracing::debug!(uuid, "querying certificate");
        self.read_record(uuid).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selector Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Every certificate held by `student_pk`. Empty when there are none.
    pub async fn get_all_certificate_by_student(
        &self,
        student_pk: &str,
    ) -> Result<Vec<Certificate>> {
        self.query_certificates(Selector::certificates_by_student(student_pk))
            .await
    }

    /// Every certificate issued by `university_pk`. Empty when there are none.
    pub async fn get_all_certificate_by_university(
        &self,
        university_pk: &str,
    ) -> Result<Vec<Certificate>> {
        self.query_certificates(Selector::certificates_by_university(university_pk))
            .await
    }

    /// Every certificate on the ledger.
    pub async fn query_all(&self) -> Result<Vec<Certificate>> {
        self.query_certificates(Selector::certificates()).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    async fn write_record<R: Record>(&self, record: &R, policy: WritePolicy) -> Result<()> {
        let key = record.key();

        if policy == WritePolicy::RejectExisting && self.exists(&key).await? {
            tracing::warn!(%key, "refusing to overwrite existing record");
            return Err(ContractError::AlreadyExists {
                kind: R::DATA_TYPE,
                key,
            });
        }

        let bytes = record
            .to_bytes()
            .map_err(|source| ContractError::Serialization {
                key: key.clone(),
                source,
            })?;

        self.ledger.put(&key, &bytes).await.map_err(|source| {
            tracing::warn!(%key, error = %source, "ledger put failed");
            ContractError::Write { key, source }
        })
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let stored = self
            .ledger
            .get(key)
            .await
            .map_err(|source| ContractError::Read {
                key: key.to_string(),
                source,
            })?;
        Ok(stored.is_some())
    }

    async fn read_record<R: Record>(&self, identity: &str) -> Result<R> {
        let key = R::key_for(identity);

        let bytes = self
            .ledger
            .get(&key)
            .await
            .map_err(|source| ContractError::Read {
                key: key.clone(),
                source,
            })?
            .ok_or_else(|| ContractError::NotFound {
                kind: R::DATA_TYPE,
                key: key.clone(),
            })?;

        R::from_bytes(&bytes).map_err(|source| ContractError::Serialization { key, source })
    }

    async fn query_certificates(&self, selector: Selector) -> Result<Vec<Certificate>> {
        debug_assert_eq!(selector.data_type(), DataType::Certificate);

        let query = selector
            .to_query_string()
            .map_err(|source| ContractError::Serialization {
                key: selector.to_string(),
                source,
            })?;
        tracing::debug!(%query, "running selector query");

        let query_failed = |source| ContractError::Query {
            selector: query.clone(),
            source,
        };

        // Dropping the iterator on an early return releases it.
        let mut results = self.ledger.query(&query).await.map_err(query_failed)?;

        let mut certificates = Vec::new();
        for entry in results.by_ref() {
            let entry = entry.map_err(query_failed)?;
            let certificate = Certificate::from_bytes(&entry.value).map_err(|source| {
                ContractError::Serialization {
                    key: entry.key.clone(),
                    source,
                }
            })?;
            certificates.push(certificate);
        }
        results.close();

        tracing::debug!(%query, count = certificates.len(), "selector query complete");
        Ok(certificates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certiblock_core::BACHELOR_SCHEMA_ORDERING;
    use certiblock_ledger::{MemoryLedger, SqliteLedger};

    fn request(uuid: &str, university_pk: &str, student_pk: &str) -> NewCertificate {
        NewCertificate {
            cert_hash: format!("hash-{uuid}"),
            university_signature: format!("usig-{uuid}"),
            student_signature: format!("ssig-{uuid}"),
            date_of_issuing: "2024-06-30".to_string(),
            cert_uuid: uuid.to_string(),
            university_pk: university_pk.to_string(),
            student_pk: student_pk.to_string(),
        }
    }

    fn memory_contract() -> CertContract<MemoryLedger> {
        new_contract(MemoryLedger::new(), ContractConfig::default())
    }

    fn sorted_uuids(certs: &[Certificate]) -> Vec<String> {
        let mut uuids: Vec<String> = certs.iter().map(|c| c.cert_uuid.clone()).collect();
        uuids.sort();
        uuids
    }

    #[tokio::test]
    async fn test_init_ledger_writes_bachelor_schema() {
        let contract = memory_contract();
        let schema = contract.init_ledger().await.unwrap();
        assert_eq!(schema.certificate_type, "Bachelor");
        assert_eq!(schema.id, "v1");

        let stored = contract.query_certificate_schema("v1").await.unwrap();
        assert_eq!(stored, schema);
        assert_eq!(stored.ordering, BACHELOR_SCHEMA_ORDERING.to_vec());
    }

    #[tokio::test]
    async fn test_init_ledger_twice_is_harmless() {
        let contract = memory_contract();
        contract.init_ledger().await.unwrap();
        contract.init_ledger().await.unwrap();
        assert_eq!(contract.ledger().keys().unwrap(), vec!["schema_v1"]);
    }

    #[tokio::test]
    async fn test_issue_then_query_by_uuid() {
        let contract = memory_contract();
        let issued = contract
            .issue_certificate(request("c1", "u1", "s1"))
            .await
            .unwrap();
        assert_eq!(issued.cert_number, "");

        let fetched = contract.query_certificate_by_uuid("c1").await.unwrap();
        assert_eq!(fetched, issued);
    }

    #[tokio::test]
    async fn test_register_then_query_university() {
        let contract = memory_contract();
        let registered = contract
            .register_university("TEDU", "pk-tedu", "Ankara", "Private university")
            .await
            .unwrap();

        let fetched = contract
            .query_university_profile_by_name("TEDU")
            .await
            .unwrap();
        assert_eq!(fetched, registered);
    }

    #[tokio::test]
    async fn test_unknown_university_is_not_found() {
        let contract = memory_contract();
        match contract.query_university_profile_by_name("unknown").await {
            Err(ContractError::NotFound { kind, key }) => {
                assert_eq!(kind, DataType::University);
                assert_eq!(key, "uni_unknown");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_schema_and_certificate_are_not_found() {
        let contract = memory_contract();
        assert!(matches!(
            contract.query_certificate_schema("v2").await,
            Err(ContractError::NotFound { .. })
        ));
        assert!(matches!(
            contract.query_certificate_by_uuid("nope").await,
            Err(ContractError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_record_is_serialization_error() {
        let contract = memory_contract();
        contract.ledger().put("cert_bad", b"{oops").await.unwrap();

        match contract.query_certificate_by_uuid("bad").await {
            Err(ContractError::Serialization { key, .. }) => assert_eq!(key, "cert_bad"),
            other => panic!("expected Serialization, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_university_record_under_cert_key_is_rejected() {
        let contract = memory_contract();
        let uni = University::new("x", "pk", "loc", "desc");
        contract
            .ledger()
            .put("cert_x", &uni.to_bytes().unwrap())
            .await
            .unwrap();

        assert!(matches!(
            contract.query_certificate_by_uuid("x").await,
            Err(ContractError::Serialization { .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_uuid_overwrites() {
        let contract = memory_contract();
        contract
            .issue_certificate(request("dup", "u1", "s1"))
            .await
            .unwrap();
        let second = contract
            .issue_certificate(request("dup", "u2", "s2"))
            .await
            .unwrap();

        let fetched = contract.query_certificate_by_uuid("dup").await.unwrap();
        assert_eq!(fetched, second);
        assert_eq!(contract.query_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reject_existing_policy() {
        let contract = new_contract(
            MemoryLedger::new(),
            ContractConfig {
                write_policy: WritePolicy::RejectExisting,
                ..ContractConfig::default()
            },
        );
        assert_eq!(contract.config().write_policy, WritePolicy::RejectExisting);
        assert_eq!(contract.config().name, "certiblock");

        let first = contract
            .issue_certificate(request("dup", "u1", "s1"))
            .await
            .unwrap();

        match contract.issue_certificate(request("dup", "u2", "s2")).await {
            Err(ContractError::AlreadyExists { kind, key }) => {
                assert_eq!(kind, DataType::Certificate);
                assert_eq!(key, "cert_dup");
            }
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
        assert_eq!(
            contract.query_certificate_by_uuid("dup").await.unwrap(),
            first
        );

        contract
            .register_university("TEDU", "pk", "Ankara", "")
            .await
            .unwrap();
        assert!(matches!(
            contract.register_university("TEDU", "pk2", "Ankara", "").await,
            Err(ContractError::AlreadyExists { .. })
        ));

        // Initialization is not subject to the policy.
        contract.init_ledger().await.unwrap();
        contract.init_ledger().await.unwrap();
    }

    #[tokio::test]
    async fn test_queries_by_student_and_university() {
        let contract = memory_contract();
        contract.issue_certificate(request("c1", "u1", "s1")).await.unwrap();
        contract.issue_certificate(request("c2", "u1", "s2")).await.unwrap();
        contract.issue_certificate(request("c3", "u2", "s1")).await.unwrap();

        let by_s1 = contract.get_all_certificate_by_student("s1").await.unwrap();
        assert_eq!(sorted_uuids(&by_s1), vec!["c1", "c3"]);

        let by_u1 = contract.get_all_certificate_by_university("u1").await.unwrap();
        assert_eq!(sorted_uuids(&by_u1), vec!["c1", "c2"]);

        assert!(contract
            .get_all_certificate_by_student("nobody")
            .await
            .unwrap()
            .is_empty());
        assert_eq!(contract.ledger().open_iterators(), 0);
    }

    #[tokio::test]
    async fn test_query_all_excludes_other_kinds() {
        let contract = memory_contract();
        contract.init_ledger().await.unwrap();
        contract
            .register_university("A", "pa", "x", "y")
            .await
            .unwrap();
        contract
            .register_university("B", "pb", "x", "y")
            .await
            .unwrap();
        contract.issue_certificate(request("c1", "pa", "s1")).await.unwrap();
        contract.issue_certificate(request("c2", "pb", "s2")).await.unwrap();

        assert_eq!(sorted_uuids(&contract.query_all().await.unwrap()), vec!["c1", "c2"]);
    }

    #[tokio::test]
    async fn test_query_empty_ledger() {
        let contract = memory_contract();
        assert!(contract.query_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_match_fails_query_and_releases_iterator() {
        let contract = memory_contract();
        contract.issue_certificate(request("c1", "u1", "s1")).await.unwrap();
        // Matches the selector but lacks every other certificate field.
        contract
            .ledger()
            .put("cert_broken", br#"{"dataType":"certificate","studentPK":"s1"}"#)
            .await
            .unwrap();

        match contract.get_all_certificate_by_student("s1").await {
            Err(ContractError::Serialization { key, .. }) => assert_eq!(key, "cert_broken"),
            other => panic!("expected Serialization, got {other:?}"),
        }
        assert_eq!(contract.ledger().open_iterators(), 0);
    }

    #[tokio::test]
    async fn test_sqlite_backed_contract() {
        let contract = new_contract(SqliteLedger::open_memory().unwrap(), ContractConfig::default());
        contract.init_ledger().await.unwrap();
        contract
            .register_university("TEDU", "pk", "Ankara", "desc")
            .await
            .unwrap();
        contract.issue_certificate(request("c1", "pk", "s1")).await.unwrap();
        contract.issue_certificate(request("c2", "pk", "s2")).await.unwrap();

        assert_eq!(contract.query_all().await.unwrap().len(), 2);
        assert_eq!(
            sorted_uuids(&contract.get_all_certificate_by_student("s2").await.unwrap()),
            vec!["c2"]
        );
        assert_eq!(
            contract.query_certificate_schema("v1").await.unwrap(),
            Schema::bachelor_v1()
        );
    }
}
