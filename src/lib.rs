//! Chat message bubble model for a conference chat: which affordances and
//! notices a message gets for a given viewer, and the view tree built from
//! them.

pub mod chat;
pub mod common;
pub mod config;
pub mod room;
pub mod store;
pub mod ui;
