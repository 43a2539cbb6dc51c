//! Storage, validation, and workflows for recording blood sugar readings.
//!
//! The [`service::SugarService`] workflows return presentation-neutral
//! responses; rendering them is left to the caller.

pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod validate;
