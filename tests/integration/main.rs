//! Integration tests for the gallery pipeline
//!
//! These tests use wiremock to serve pages and images and run the pipeline
//! end-to-end against temporary folders.

mod cli_tests;
mod fetch_tests;
mod gallery_tests;
