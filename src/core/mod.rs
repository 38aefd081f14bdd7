//! Core library components.
//!
//! Configuration and set resolution, key handling, the cipher, the archiver
//! seam, `.gitignore` merging, and the [`project`] pipelines built on them.

pub mod archive;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod gitignore;
pub mod key;
pub mod project;
pub mod sets;
