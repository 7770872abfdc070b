use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{ContactStore, StoreError, StoreResult};
use crate::domain::contact::{Contact, ContactFields, ContactId, User, UserId};

/// In-process store that enforces the same constraints as the sqlite schema.
pub struct MemStore {
    data: Mutex<MemData>,
}

#[derive(Default)]
struct MemData {
    users: BTreeMap<UserId, User>,
    contacts: BTreeMap<ContactId, Contact>,
    last_user_id: UserId,
    last_contact_id: ContactId,
}

impl MemData {
    fn phone_taken(&self, owner: UserId, phone: &str, except: Option<ContactId>) -> bool {
        self.contacts.values().any(|c| {
            c.user_id == owner && c.phone == phone && Some(c.contact_id) != except
        })
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(MemData::default()),
        }
    }

    fn data(&self) -> StoreResult<MutexGuard<'_, MemData>> {
        self.data
            .lock()
            .map_err(|e| StoreError::Backend(format!("memory store lock poisoned: {}", e)))
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MemStore {
    async fn insert_contact(&self, owner: UserId, fields: &ContactFields) -> StoreResult<Contact> {
        let mut data = self.data()?;

        if !data.users.contains_key(&owner) {
            return Err(StoreError::Backend(
                "FOREIGN KEY constraint failed".to_string(),
            ));
        }
        if data.phone_taken(owner, fields.phone(), None) {
            return Err(StoreError::ConstraintViolation(
                "contacts.user_id, contacts.phone".to_string(),
            ));
        }

        data.last_contact_id += 1;
        let contact = Contact {
            contact_id: data.last_contact_id,
            name: fields.name().to_string(),
            phone: fields.phone().to_string(),
            user_id: owner,
        };
        data.contacts.insert(contact.contact_id, contact.clone());

        Ok(contact)
    }

    async fn update_owned_contact(
        &self,
        contact_id: ContactId,
        owner: UserId,
        fields: &ContactFields,
    ) -> StoreResult<Option<Contact>> {
        let mut data = self.data()?;

        let owned = data
            .contacts
            .get(&contact_id)
            .is_some_and(|c| c.user_id == owner);
        if !owned {
            return Ok(None);
        }
        if data.phone_taken(owner, fields.phone(), Some(contact_id)) {
            return Err(StoreError::ConstraintViolation(
                "contacts.user_id, contacts.phone".to_string(),
            ));
        }

        Ok(data.contacts.get_mut(&contact_id).map(|contact| {
            contact.name = fields.name().to_string();
            contact.phone = fields.phone().to_string();
            contact.clone()
        }))
    }

    async fn delete_owned_contact(&self, contact_id: ContactId, owner: UserId) -> StoreResult<u64> {
        let mut data = self.data()?;

        match data.contacts.get(&contact_id) {
            Some(contact) if contact.user_id == owner => {
                data.contacts.remove(&contact_id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn get_contact(&self, contact_id: ContactId) -> StoreResult<Option<Contact>> {
        Ok(self.data()?.contacts.get(&contact_id).cloned())
    }

    async fn count_contacts(&self) -> StoreResult<u64> {
        Ok(self.data()?.contacts.len() as u64)
    }

    async fn create_user(&self, username: &str, password: &str) -> StoreResult<User> {
        let mut data = self.data()?;

        if data.users.values().any(|u| u.username == username) {
            return Err(StoreError::ConstraintViolation("users.username".to_string()));
        }

        data.last_user_id += 1;
        let user = User {
            user_id: data.last_user_id,
            username: username.to_string(),
            password: password.to_string(),
        };
        data.users.insert(user.user_id, user.clone());

        Ok(user)
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}
