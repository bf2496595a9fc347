//! Claim defaulting: fills in missing image and size specs.

use crate::claim::VolumeClaim;
use crate::error::ProvisionError;
use crate::keys;

/// Fills in the front-end image and the per-role size dimensions.
///
/// User-supplied values always win: the image label is only written when
/// absent, and the front-end/back-end size dimensions are only copied from
/// the base `storage` request when absent or non-positive. Re-applying to an
/// already-defaulted claim is a no-op.
///
/// # Errors
///
/// Returns [`ProvisionError::MissingSpec`] when the claim requests no base
/// storage size and [`ProvisionError::InvalidSize`] when the base size is
/// not strictly positive.
pub fn apply_defaults(claim: &mut VolumeClaim) -> Result<(), ProvisionError> {
    let base = claim
        .requested_sizes
        .get(keys::STORAGE_SIZE)
        .ok_or(ProvisionError::MissingSpec)?;
    if !base.is_positive() {
        return Err(ProvisionError::InvalidSize {
            dimension: keys::STORAGE_SIZE.to_owned(),
            value: base.to_string(),
        });
    }
    let base_size = base.clone();

    claim
        .labels
        .set_if_absent(keys::FRONTEND_IMAGE, keys::DEFAULT_FRONTEND_IMAGE);

    for dimension in [keys::FRONTEND_SIZE, keys::BACKEND_SIZE] {
        let needs_default = claim
            .requested_sizes
            .get(dimension)
            .is_none_or(|quantity| !quantity.is_positive());
        if needs_default {
            claim
                .requested_sizes
                .insert(dimension.to_owned(), base_size.clone());
        }
    }

    Ok(())
}
