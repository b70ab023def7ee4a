//! # tempfiles-entity
//!
//! Domain entity models for Tempfiles. The folder record is the only
//! persisted entity; the other types here describe how it is created,
//! partially updated, and scanned.

pub mod folder;
