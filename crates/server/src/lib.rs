//! Course management backend: accounts, catalog, lesson content, Q&A and
//! enrollment progress over HTTP.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod repository;
pub mod service;
