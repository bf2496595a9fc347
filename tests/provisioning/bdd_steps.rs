//! BDD step definitions for the provisioning pipeline.

use std::fmt;

use jiva_provision::test_support::FakeProvider;
use jiva_provision::{JivaProvisioner, Quantity, VolumeClaim, keys};
use rstest_bdd_macros::{given, then, when};

use super::test_helpers::ProvisionContext;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
    #[error("scenario state missing: {0}")]
    State(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct CidrBlock(String);

impl From<String> for CidrBlock {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CidrBlock {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for CidrBlock {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self(value.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct ReplicaCount(String);

impl From<String> for ReplicaCount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ReplicaCount {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for ReplicaCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for ReplicaCount {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self(value.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct StorageSize(String);

impl From<String> for StorageSize {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for StorageSize {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for StorageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for StorageSize {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self(value.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct ErrorSnippet(String);

impl From<String> for ErrorSnippet {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ErrorSnippet {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for ErrorSnippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for ErrorSnippet {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self(value.to_owned()))
    }
}

#[given("a provider advertising network CIDR \"{cidr}\" and replica count \"{count}\"")]
fn provider_with_network(
    provision_context: &mut ProvisionContext,
    cidr: CidrBlock,
    count: ReplicaCount,
) {
    let provider = FakeProvider::new()
        .with_region("eu-west")
        .with_datacenter("eu-west-1a")
        .with_storage_property(keys::REPLICA_COUNT, count.as_ref())
        .with_network_property(keys::NETWORK_CIDR, cidr.as_ref());
    provision_context.pipeline = Some(JivaProvisioner::new(provider));
}

#[given("a provider without network support")]
fn provider_without_network(provision_context: &mut ProvisionContext) {
    let provider = FakeProvider::new()
        .named("storeonly")
        .with_storage_property(keys::REPLICA_COUNT, "2")
        .without_network();
    provision_context.pipeline = Some(JivaProvisioner::new(provider));
}

#[given("a claim requesting \"{size}\" of storage")]
fn claim_with_storage(
    provision_context: &mut ProvisionContext,
    size: StorageSize,
) -> Result<(), StepError> {
    let quantity: Quantity = size
        .as_ref()
        .parse()
        .map_err(|err| StepError::State(format!("bad quantity in feature: {err}")))?;
    provision_context.claim =
        Some(VolumeClaim::new("bdd-vol").with_request(keys::STORAGE_SIZE, quantity));
    Ok(())
}

#[given("a claim requesting no storage")]
fn claim_without_storage(provision_context: &mut ProvisionContext) {
    provision_context.claim = Some(VolumeClaim::new("bdd-vol"));
}

#[when("the claim is provisioned")]
fn provision_claim(provision_context: &mut ProvisionContext) -> Result<(), StepError> {
    let pipeline = provision_context
        .pipeline
        .as_ref()
        .ok_or_else(|| StepError::State(String::from("no provider configured")))?;
    let mut claim = provision_context
        .claim
        .take()
        .ok_or_else(|| StepError::State(String::from("no claim configured")))?;

    let outcome = pipeline.provision(&mut claim);
    provision_context.claim = Some(claim);
    provision_context.outcome = Some(outcome);
    Ok(())
}

#[then("the claim carries a front-end address and \"{count}\" back-end addresses")]
fn assert_addresses(
    provision_context: &ProvisionContext,
    count: ReplicaCount,
) -> Result<(), StepError> {
    let claim = provision_context
        .claim
        .as_ref()
        .ok_or_else(|| StepError::State(String::from("no claim in context")))?;
    let expected: usize = count
        .as_ref()
        .parse()
        .map_err(|err| StepError::State(format!("bad count in feature: {err}")))?;

    if !claim.labels.is_set(keys::FRONTEND_IP) {
        return Err(StepError::Assertion(String::from(
            "front-end address label is unset",
        )));
    }
    let backend = claim
        .labels
        .get(keys::BACKEND_IPS)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StepError::Assertion(String::from("back-end address label is unset")))?;
    let actual = backend.split(',').count();
    if actual != expected {
        return Err(StepError::Assertion(format!(
            "expected {expected} back-end addresses, got {actual}: {backend}"
        )));
    }
    Ok(())
}

#[then("the subnet label is \"{subnet}\"")]
fn assert_subnet(
    provision_context: &ProvisionContext,
    subnet: CidrBlock,
) -> Result<(), StepError> {
    let claim = provision_context
        .claim
        .as_ref()
        .ok_or_else(|| StepError::State(String::from("no claim in context")))?;
    let actual = claim.labels.get(keys::SUBNET).unwrap_or_default();
    if actual != subnet.as_ref() {
        return Err(StepError::Assertion(format!(
            "expected subnet '{subnet}', got '{actual}'"
        )));
    }
    Ok(())
}

#[then("provisioning fails with \"{snippet}\"")]
fn assert_failure(
    provision_context: &ProvisionContext,
    snippet: ErrorSnippet,
) -> Result<(), StepError> {
    let outcome = provision_context
        .outcome
        .as_ref()
        .ok_or_else(|| StepError::State(String::from("claim was never provisioned")))?;
    let Err(error) = outcome else {
        return Err(StepError::Assertion(String::from(
            "expected provisioning to fail",
        )));
    };
    let rendered = error.to_string();
    if !rendered.contains(snippet.as_ref()) {
        return Err(StepError::Assertion(format!(
            "expected error containing '{snippet}', got: {rendered}"
        )));
    }
    Ok(())
}

#[then("the placed volume is named \"{name}\"")]
fn assert_volume_name(
    provision_context: &ProvisionContext,
    name: ErrorSnippet,
) -> Result<(), StepError> {
    let outcome = provision_context
        .outcome
        .as_ref()
        .ok_or_else(|| StepError::State(String::from("claim was never provisioned")))?;
    let Ok(volume) = outcome else {
        return Err(StepError::Assertion(String::from(
            "expected provisioning to succeed",
        )));
    };
    if volume.name != name.as_ref() {
        return Err(StepError::Assertion(format!(
            "expected volume '{name}', got '{}'",
            volume.name
        )));
    }
    Ok(())
}
