//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod archive_helpers;
pub mod workbook_fixtures;
