pub mod contact;
pub mod service;

pub use contact::{Contact, ContactPayload, User};
pub use service::ContactService;
