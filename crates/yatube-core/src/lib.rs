//! # Yatube Core
//!
//! The domain layer of the Yatube blog.
//! This crate contains the data model, the post form binder and the ports
//! infrastructure must implement. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod ports;

pub use error::DomainError;
