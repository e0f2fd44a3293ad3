//! Core functionality modules
//!
//! This module contains the lyrics-to-cloud logic organized into layers:
//! - `lyrics`: Song queries and fetched lyrics
//! - `services`: Lyrics sources (Genius, LRCLIB, static table)
//! - `normalize`: Section-tag and blank-line cleanup
//! - `wordcloud`: Word counting, layout and image output
//! - `pipeline`: One submission from fetch to rendered cloud

pub mod lyrics;
pub mod normalize;
pub mod pipeline;
pub mod services;
pub mod wordcloud;
