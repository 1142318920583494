//! Core types and services for petpoint
//!
//! This crate provides the session store and its sweeper, configuration
//! loading, logging setup and the NLP collaborators used by the chat
//! endpoint.

pub mod config;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod session;

pub use error::{Error, Result};
