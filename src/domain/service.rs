use std::sync::Arc;

use serde::Serialize;

use super::contact::{Contact, ContactId, ContactPayload, User, UserId, ValidationReq};
use crate::errors::{AppError, Field};
use crate::store::ContactStore;

pub const CONTACT_DELETED_MSG: &str = "Contacto eliminado";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub message: String,
}

/// Mutation that found no row for `(contact_id, requester)`.
#[derive(Debug, Clone, Copy)]
enum Unmatched {
    Update,
    Delete,
}

// A missing row and a row owned by someone else are never told apart.
// Update answers Forbidden and delete answers NotFound; both choices live here.
fn unmatched_row(op: Unmatched) -> AppError {
    match op {
        Unmatched::Update => AppError::Forbidden,
        Unmatched::Delete => AppError::NotFound,
    }
}

fn log_rejection(err: &AppError) {
    match err {
        AppError::InvalidInput(Field::Name) => {
            tracing::debug!("Rejected contact name. {}", ValidationReq::name_req())
        }
        AppError::InvalidInput(Field::Phone) => {
            tracing::debug!("Rejected contact phone. {}", ValidationReq::phone_req())
        }
        _ => {}
    }
}

/// Create, update and delete for contacts, always scoped to the requester.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn ContactStore {
        self.store.as_ref()
    }

    pub async fn create_contact(
        &self,
        requester: UserId,
        payload: ContactPayload,
    ) -> Result<Contact, AppError> {
        let fields = payload.validate().inspect_err(log_rejection)?;

        let contact = self.store.insert_contact(requester, &fields).await?;

        tracing::debug!(
            contact_id = contact.contact_id,
            user_id = requester,
            "Contact created"
        );
        Ok(contact)
    }

    pub async fn update_contact(
        &self,
        requester: UserId,
        contact_id: ContactId,
        payload: ContactPayload,
    ) -> Result<Contact, AppError> {
        let fields = payload.validate().inspect_err(log_rejection)?;

        let contact = self
            .store
            .update_owned_contact(contact_id, requester, &fields)
            .await?
            .ok_or_else(|| unmatched_row(Unmatched::Update))?;

        tracing::debug!(contact_id, user_id = requester, "Contact updated");
        Ok(contact)
    }

    pub async fn delete_contact(
        &self,
        requester: UserId,
        contact_id: ContactId,
    ) -> Result<Deleted, AppError> {
        let removed = self.store.delete_owned_contact(contact_id, requester).await?;

        if removed == 0 {
            return Err(unmatched_row(Unmatched::Delete));
        }

        tracing::debug!(contact_id, user_id = requester, "Contact deleted");
        Ok(Deleted {
            message: CONTACT_DELETED_MSG.to_string(),
        })
    }

    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self.store.create_user(username, password).await?;

        tracing::info!(user_id = user.user_id, "User created");
        Ok(user)
    }
}
