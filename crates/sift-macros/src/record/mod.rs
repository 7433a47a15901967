//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates one typed `sift::Field` constant per struct field and the
//! `sift::Record` field registry.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
