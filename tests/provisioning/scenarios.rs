//! BDD scenarios for the provisioning pipeline.

use rstest_bdd_macros::scenario;

use super::test_helpers::{ProvisionContext, provision_context};

#[scenario(
    path = "tests/features/provisioning.feature",
    name = "Enrich a sparse claim and assign addresses"
)]
fn scenario_enrich_sparse_claim(provision_context: ProvisionContext) {
    drop(provision_context);
}

#[scenario(
    path = "tests/features/provisioning.feature",
    name = "Surface a provider without network support"
)]
fn scenario_missing_network_capability(provision_context: ProvisionContext) {
    drop(provision_context);
}

#[scenario(
    path = "tests/features/provisioning.feature",
    name = "Reject a claim with no storage request"
)]
fn scenario_missing_storage_spec(provision_context: ProvisionContext) {
    drop(provision_context);
}

#[scenario(
    path = "tests/features/provisioning.feature",
    name = "Reject a non-positive storage request"
)]
fn scenario_non_positive_storage(provision_context: ProvisionContext) {
    drop(provision_context);
}
