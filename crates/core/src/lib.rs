//! Domain types and rules for the LMS backend.

pub mod domain;
