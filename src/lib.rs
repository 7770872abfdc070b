pub mod api;
pub mod cli;
pub mod domain;
pub mod errors;
pub mod prelude;
pub mod store;
pub mod validation;
