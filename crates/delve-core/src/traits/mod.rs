//! Collaborator abstractions
//!
//! Core defines the text-in/text-out interfaces it needs; `delve-llm`
//! provides HTTP implementations and tests use the doubles in
//! [`crate::test_support`].

mod collaborator;

pub use collaborator::*;
