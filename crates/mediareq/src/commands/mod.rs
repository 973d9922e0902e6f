//! Command implementations that are not plain storage calls.

pub mod init;
