//! Listing lookup and the ownership proof guarding mutations.

use market_types::{Listing, ObjectId, Password};

use crate::error::{Action, ApiError};
use crate::{AppState, with_store};

/// Decides whether a supplied password proves ownership of a listing.
pub trait OwnershipCheck: Send + Sync {
    fn is_owner(&self, listing: &Listing, supplied: &Password) -> bool;
}

/// Exact numeric equality against the stored password.
pub struct PlaintextPassword;

impl OwnershipCheck for PlaintextPassword {
    fn is_owner(&self, listing: &Listing, supplied: &Password) -> bool {
        listing.password == *supplied
    }
}

pub async fn find_by_id(state: &AppState, id: ObjectId) -> Result<Listing, ApiError> {
    with_store(state, move |store| store.find_one(&id))
        .await?
        .ok_or(ApiError::NotFound)
}

pub fn authorize(
    check: &dyn OwnershipCheck,
    listing: &Listing,
    supplied: &Password,
    action: Action,
) -> Result<(), ApiError> {
    if check.is_owner(listing, supplied) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(action))
    }
}
