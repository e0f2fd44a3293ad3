//! Command Line Interface module
//!
//! - `cloud`: one-shot fetch, clean and render for a single title
//! - `interactive`: prompt loop, one title per line
//! - `clean`: run the lyrics normalizer over a file or stdin
//! - `config`: show the effective configuration
//! - `output`: text and JSON rendering of results

pub mod clean;
pub mod cloud;
pub mod config;
pub mod interactive;
pub mod output;
