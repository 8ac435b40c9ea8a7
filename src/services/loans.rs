//! Loan lifecycle service.
//!
//! The only transition implemented is the return: OnLoan → Available, gated
//! by an ordered guard chain. Checkout, hold and maintenance transitions are
//! not defined here; status otherwise only changes through generic instance
//! updates by catalog staff.

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{book_instance::BookInstance, user::UserClaims},
    repository::Repository,
};

/// Guard chain for the return transition. Guards run in order and the first
/// failure wins:
/// 1. the requester holds the can_mark_returned permission;
/// 2. the requester is the instance's current borrower.
/// The ownership failure is deliberately generic; it does not reveal who the
/// actual borrower is, or whether there is one.
pub fn return_guards(instance: &BookInstance, claims: &UserClaims) -> AppResult<()> {
    claims.require_can_mark_returned()?;

    match instance.borrower_id {
        Some(borrower_id) if borrower_id == claims.user_id => Ok(()),
        _ => Err(AppError::Authorization(
            "This copy is not on loan to your account".to_string(),
        )),
    }
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Instances currently on loan to a user, soonest due first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<BookInstance>> {
        self.repository.instances.list_on_loan_for_user(user_id).await
    }

    /// Mark a copy returned. Existence is checked first (NotFound before any
    /// authorization answer), then the guard chain runs, then the status and
    /// borrower are cleared in one atomic update keyed on the borrower so a
    /// concurrent return cannot slip between the check and the write.
    pub async fn return_instance(
        &self,
        instance_id: Uuid,
        claims: &UserClaims,
    ) -> AppResult<BookInstance> {
        let instance = self.repository.instances.get_by_id(instance_id).await?;

        return_guards(&instance, claims)?;

        let returned = self
            .repository
            .instances
            .mark_returned(instance_id, claims.user_id)
            .await?;

        tracing::info!(
            instance_id = %instance_id,
            user_id = claims.user_id,
            "Book instance marked returned"
        );

        Ok(returned)
    }
}
