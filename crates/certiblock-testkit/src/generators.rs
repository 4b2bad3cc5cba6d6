//! Proptest generators for property-based testing.

use proptest::prelude::*;

use certiblock_core::{DataType, NewCertificate};

/// Generate a DataType.
pub fn data_type() -> impl Strategy<Value = DataType> {
    prop_oneof![
        Just(DataType::Certificate),
        Just(DataType::University),
        Just(DataType::Schema),
    ]
}

/// Generate a non-empty identity.
///
/// Includes quotes, backslashes, braces and non-ASCII so that selector and
/// key handling see hostile input.
pub fn identity() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9-]{1,36}",
        "[a-z\"'\\\\{}:, ]{1,24}",
        "\\PC{1,16}",
    ]
}

/// Generate an arbitrary field value. May be empty.
pub fn field_value() -> impl Strategy<Value = String> {
    prop_oneof!["", identity()]
}

/// Generate a hex public key.
pub fn public_key() -> impl Strategy<Value = String> {
    any::<[u8; 32]>().prop_map(hex::encode)
}

/// Generate a certificate issuance request.
pub fn new_certificate() -> impl Strategy<Value = NewCertificate> {
    (
        any::<[u8; 32]>(),
        field_value(),
        field_value(),
        field_value(),
        identity(),
        prop_oneof![public_key(), identity()],
        prop_oneof![public_key(), identity()],
    )
        .prop_map(
            |(
                hash,
                university_signature,
                student_signature,
                date_of_issuing,
                cert_uuid,
                university_pk,
                student_pk,
            )| NewCertificate {
                cert_hash: hex::encode(hash),
                university_signature,
                student_signature,
                date_of_issuing,
                cert_uuid,
                university_pk,
                student_pk,
            },
        )
}

/// Parameters for university registration.
#[derive(Debug, Clone)]
pub struct UniversityParams {
    pub name: String,
    pub public_key: String,
    pub location: String,
    pub description: String,
}

impl Arbitrary for UniversityParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (identity(), public_key(), field_value(), field_value())
            .prop_map(|(name, public_key, location, description)| UniversityParams {
                name,
                public_key,
                location,
                description,
            })
            .boxed()
    }
}

/// A batch of requests spread over a few universities and students.
///
/// UUIDs are unique within the batch.
pub fn issuance_batch(max_len: usize) -> impl Strategy<Value = Vec<NewCertificate>> {
    let universities = prop::collection::vec(public_key(), 1..=3);
    let students = prop::collection::vec(public_key(), 1..=3);
    (universities, students).prop_flat_map(move |(universities, students)| {
        prop::collection::vec((new_certificate(), any::<usize>(), any::<usize>()), 0..=max_len)
            .prop_map(move |picks| {
                picks
                    .into_iter()
                    .enumerate()
                    .map(|(i, (mut request, u, s))| {
                        request.cert_uuid = format!("{i}-{}", request.cert_uuid);
                        request.university_pk = universities[u % universities.len()].clone();
                        request.student_pk = students[s % students.len()].clone();
                        request
                    })
                    .collect()
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn identities_are_non_empty(id in identity()) {
            prop_assert!(!id.is_empty());
        }

        #[test]
        fn batch_uuids_are_unique(batch in issuance_batch(16)) {
            let uuids: HashSet<&str> = batch.iter().map(|r| r.cert_uuid.as_str()).collect();
            prop_assert_eq!(uuids.len(), batch.len());
        }

        #[test]
        fn request_hash_is_hex(request in new_certificate()) {
            prop_assert_eq!(request.cert_hash.len(), 64);
            prop_assert!(hex::decode(&request.cert_hash).is_ok());
        }
    }
}
