//! Mediareq - a media request ticket store.
//!
//! This crate provides the request store used by the chat bot, plus a CLI
//! application for operating on it directly.
//!
//! - [`domain`]: tickets, ids and statuses
//! - [`id_generation`]: random 4-digit ids with collision resampling
//! - [`storage`]: the async [`storage::TicketStorage`] trait, the in-memory
//!   store and its JSON file persistence
//! - [`commands::init`]: repository discovery and configuration

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod id_generation;
pub mod storage;

// Application context and command implementations
pub mod app;
pub mod commands;

// Public CLI module (needed by binary)
pub mod cli;

pub mod output;
