//! Golden test vectors for deterministic verification.
//!
//! Other readers of the ledger parse stored records and issue selector
//! queries themselves, so these bytes must stay identical across releases.

use certiblock_core::{Certificate, Record, Schema, Selector, University};

/// A stored record with its expected key and bytes.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Expected ledger key.
    pub key: &'static str,
    /// Expected stored bytes.
    pub json: &'static str,
}

/// A selector with its expected query string.
#[derive(Debug, Clone)]
pub struct SelectorVector {
    pub name: &'static str,
    pub selector: Selector,
    pub expected: &'static str,
}

/// Get all record vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "Certificate with every field set",
            key: "cert_123e4567-e89b-12d3-a456-426614174000",
            json: concat!(
                r#"{"certHash":"af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262","#,
                r#""universitySignature":"usig","studentSignature":"ssig","#,
                r#""dateOfIssuing":"2024-06-30","certNumber":"42","#,
                r#""certUUID":"123e4567-e89b-12d3-a456-426614174000","#,
                r#""universityPK":"upk","studentPK":"spk","dataType":"certificate"}"#,
            ),
        },
        GoldenVector {
            name: "Certificate with escaped characters",
            key: "cert_q\"id",
            json: concat!(
                r#"{"certHash":"","universitySignature":"","studentSignature":"","#,
                r#""dateOfIssuing":"","certNumber":"","certUUID":"q\"id","#,
                r#""universityPK":"ü","studentPK":"a\\b","dataType":"certificate"}"#,
            ),
        },
        GoldenVector {
            name: "University profile",
            key: "uni_TEDU",
            json: r#"{"name":"TEDU","publicKey":"upk","location":"Ankara","description":"TED University","dataType":"university"}"#,
        },
        GoldenVector {
            name: "Bachelor v1 schema",
            key: "schema_v1",
            json: r#"{"certificateType":"Bachelor","id":"v1","ordering":["universityName","major","departmentName","cgpa"],"dataType":"schema"}"#,
        },
    ]
}

/// The record each vector describes, built through the public constructors.
pub fn generate_record_from_vector(vector: &GoldenVector) -> Option<(String, Vec<u8>)> {
    fn encode<R: Record>(record: R) -> Option<(String, Vec<u8>)> {
        let bytes = record.to_bytes().ok()?;
        Some((record.key(), bytes))
    }

    match vector.name {
        "Certificate with every field set" => encode(Certificate::new(
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262",
            "usig",
            "ssig",
            "2024-06-30",
            "42",
            "123e4567-e89b-12d3-a456-426614174000",
            "upk",
            "spk",
        )),
        "Certificate with escaped characters" => {
            encode(Certificate::new("", "", "", "", "", "q\"id", "ü", "a\\b"))
        }
        "University profile" => encode(University::new("TEDU", "upk", "Ankara", "TED University")),
        "Bachelor v1 schema" => encode(Schema::bachelor_v1()),
        _ => None,
    }
}

/// Get all selector vectors.
pub fn selector_vectors() -> Vec<SelectorVector> {
    vec![
        SelectorVector {
            name: "All certificates",
            selector: Selector::certificates(),
            expected: r#"{"selector":{"dataType":"certificate"}}"#,
        },
        SelectorVector {
            name: "Certificates by student",
            selector: Selector::certificates_by_student("spk"),
            expected: r#"{"selector":{"dataType":"certificate","studentPK":"spk"}}"#,
        },
        SelectorVector {
            name: "Certificates by university",
            selector: Selector::certificates_by_university("upk"),
            expected: r#"{"selector":{"dataType":"certificate","universityPK":"upk"}}"#,
        },
        SelectorVector {
            name: "Student key with quotes",
            selector: Selector::certificates_by_student(r#"x","dataType":"university"#),
            expected: r#"{"selector":{"dataType":"certificate","studentPK":"x\",\"dataType\":\"university"}}"#,
        },
    ]
}

/// Verify every vector. Returns the names of the vectors that failed.
pub fn verify_all_vectors() -> Result<(), Vec<&'static str>> {
    let mut failed = Vec::new();

    for vector in all_vectors() {
        let ok = match generate_record_from_vector(&vector) {
            Some((key, bytes)) => key == vector.key && bytes == vector.json.as_bytes(),
            None => false,
        };
        if !ok {
            failed.push(vector.name);
        }
    }

    for vector in selector_vectors() {
        if vector.selector.to_query_string().ok().as_deref() != Some(vector.expected) {
            failed.push(vector.name);
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(failed)
    }
}
