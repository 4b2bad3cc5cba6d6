//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a contract over a fresh
//! in-memory ledger, plus universities and students holding real Ed25519
//! keys so that certificates carry well-formed keys and signatures.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;

use certiblock::{new_contract, CertContract, ContractConfig, Result};
use certiblock_core::{content_hash, Certificate, NewCertificate, University};
use certiblock_ledger::MemoryLedger;

/// A university or student with a signing key.
pub struct Party {
    pub name: String,
    signing_key: SigningKey,
}

impl Party {
    /// Create a party with a random key.
    pub fn generate(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Create a party with a deterministic key from seed.
    pub fn from_seed(name: impl Into<String>, seed: [u8; 32]) -> Self {
        Self {
            name: name.into(),
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Hex-encoded public key, as stored in `universityPK` / `studentPK`.
    pub fn public_key(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }

    /// Hex-encoded signature over `message`.
    pub fn sign(&self, message: &[u8]) -> String {
        hex::encode(self.signing_key.sign(message).to_bytes())
    }
}

/// Check a hex signature against a hex public key.
pub fn verify_signature(public_key: &str, message: &[u8], signature: &str) -> bool {
    let Ok(key) = hex::decode(public_key) else {
        return false;
    };
    let Ok(sig) = hex::decode(signature) else {
        return false;
    };
    let (Ok(key), Ok(sig)) = (<[u8; 32]>::try_from(key), <[u8; 64]>::try_from(sig)) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&key) else {
        return false;
    };
    key.verify(message, &Signature::from_bytes(&sig)).is_ok()
}

/// A random version 4 UUID in its hyphenated form.
pub fn random_uuid() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex = hex::encode(bytes);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

/// A contract over a memory ledger with one university and one student.
pub struct TestFixture {
    pub contract: CertContract<MemoryLedger>,
    pub university: Party,
    pub student: Party,
}

impl TestFixture {
    /// Create a new fixture with random keys.
    pub fn new() -> Self {
        Self::with_config(ContractConfig::default())
    }

    /// Create a fixture whose contract uses `config`.
    pub fn with_config(config: ContractConfig) -> Self {
        Self {
            contract: new_contract(MemoryLedger::new(), config),
            university: Party::generate("TEDU"),
            student: Party::generate("alice"),
        }
    }

    /// Create with deterministic keys from seeds.
    pub fn with_seeds(university_seed: [u8; 32], student_seed: [u8; 32]) -> Self {
        Self {
            contract: new_contract(MemoryLedger::new(), ContractConfig::default()),
            university: Party::from_seed("TEDU", university_seed),
            student: Party::from_seed("alice", student_seed),
        }
    }

    /// Register the fixture's university on the ledger.
    pub async fn register_university(&self) -> Result<University> {
        self.contract
            .register_university(
                &self.university.name,
                &self.university.public_key(),
                "Ankara",
                "Test university",
            )
            .await
    }

    /// An issuance request for `document`, signed by both parties.
    pub fn certificate_request(&self, cert_uuid: &str, document: &[u8]) -> NewCertificate {
        make_request(&self.university, &self.student, cert_uuid, document)
    }

    /// Issue a certificate for `document` under a fresh UUID.
    pub async fn issue(&self, document: &[u8]) -> Result<Certificate> {
        self.contract
            .issue_certificate(self.certificate_request(&random_uuid(), document))
            .await
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a signed issuance request between any two parties.
///
/// Both signatures cover the hex content hash of `document`.
pub fn make_request(
    university: &Party,
    student: &Party,
    cert_uuid: &str,
    document: &[u8],
) -> NewCertificate {
    let cert_hash = content_hash(document);
    NewCertificate {
        university_signature: university.sign(cert_hash.as_bytes()),
        student_signature: student.sign(cert_hash.as_bytes()),
        cert_hash,
        date_of_issuing: "2024-06-30".to_string(),
        cert_uuid: cert_uuid.to_string(),
        university_pk: university.public_key(),
        student_pk: student.public_key(),
    }
}
