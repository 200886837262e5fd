//! trivia-api - REST API backend for a trivia application
//!
//! CRUD-style endpoints over a relational store of categories and
//! questions, with keyword search, pagination, and a quiz mode that
//! serves one random unseen question at a time.

pub mod cli;
pub mod http_server;
pub mod model;
pub mod store;
