//! Host-facing entry point.
//!
//! The host runtime invokes contract functions by name with positional
//! string arguments and expects a JSON result. This module maps those
//! names onto [`CertContract`] methods.

use serde::Serialize;
use serde_json::Value;

use certiblock_core::{CoreError, NewCertificate};
use certiblock_ledger::Ledger;

use crate::contract::CertContract;
use crate::error::{ContractError, Result};

/// Function names exported to the host, exactly as it invokes them.
pub const FUNCTION_NAMES: [&str; 9] = [
    "InitLedger",
    "issueCertificate",
    "registerUniversity",
    "queryUniversityProfileByName",
    "queryCertificateSchema",
    "queryCertificateByUUID",
    "getAllCertificateByStudent",
    "getAllCertificateByUniversity",
    "queryAll",
];

impl<L: Ledger> CertContract<L> {
    /// Invoke a contract function by its host-visible name.
    ///
    /// Returns the operation's result as JSON: a single record object, or an
    /// array of certificates for the multi-record queries.
    pub async fn invoke<A>(&self, function: &str, args: &[A]) -> Result<Value>
    where
        A: AsRef<str> + Sync,
    {
        tracing::debug!(function, args = args.len(), "invoke");

        match function {
            "InitLedger" => {
                let [] = arity::<_, 0>(function, args)?;
                to_json(function, &self.init_ledger().await?)
            }
            "issueCertificate" => {
                let [
                    cert_hash,
                    university_signature,
                    student_signature,
                    date_of_issuing,
                    cert_uuid,
                    university_pk,
                    student_pk,
                ] = arity::<_, 7>(function, args)?;
                let request = NewCertificate {
                    cert_hash: cert_hash.to_string(),
                    university_signature: university_signature.to_string(),
                    student_signature: student_signature.to_string(),
                    date_of_issuing: date_of_issuing.to_string(),
                    cert_uuid: cert_uuid.to_string(),
                    university_pk: university_pk.to_string(),
                    student_pk: student_pk.to_string(),
                };
                to_json(function, &self.issue_certificate(request).await?)
            }
            "registerUniversity" => {
                let [name, public_key, location, description] = arity::<_, 4>(function, args)?;
                let university = self
                    .register_university(name, public_key, location, description)
                    .await?;
                to_json(function, &university)
            }
            "queryUniversityProfileByName" => {
                let [name] = arity::<_, 1>(function, args)?;
                to_json(function, &self.query_university_profile_by_name(name).await?)
            }
            "queryCertificateSchema" => {
                let [version] = arity::<_, 1>(function, args)?;
                to_json(function, &self.query_certificate_schema(version).await?)
            }
            "queryCertificateByUUID" => {
                let [uuid] = arity::<_, 1>(function, args)?;
                to_json(function, &self.query_certificate_by_uuid(uuid).await?)
            }
            "getAllCertificateByStudent" => {
                let [student_pk] = arity::<_, 1>(function, args)?;
                to_json(function, &self.get_all_certificate_by_student(student_pk).await?)
            }
            "getAllCertificateByUniversity" => {
                let [university_pk] = arity::<_, 1>(function, args)?;
                to_json(
                    function,
                    &self.get_all_certificate_by_university(university_pk).await?,
                )
            }
            "queryAll" => {
                let [] = arity::<_, 0>(function, args)?;
                to_json(function, &self.query_all().await?)
            }
            _ => Err(ContractError::UnknownFunction(function.to_string())),
        }
    }
}

/// Check the argument count and borrow the arguments as a fixed array.
fn arity<'a, A: AsRef<str>, const N: usize>(
    function: &str,
    args: &'a [A],
) -> Result<[&'a str; N]> {
    if args.len() != N {
        return Err(ContractError::InvalidArguments {
            function: function.to_string(),
            expected: N,
            got: args.len(),
        });
    }
    Ok(std::array::from_fn(|i| args[i].as_ref()))
}

fn to_json<T: Serialize>(function: &str, result: &T) -> Result<Value> {
    serde_json::to_value(result).map_err(|e| ContractError::Serialization {
        key: function.to_string(),
        source: CoreError::Encode(e),
    })
}
