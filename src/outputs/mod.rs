//! Output generation.
//!
//! One run produces one JSON archive file named after the source label and
//! the target date:
//!
//! ```text
//! output_dir/
//! └── guardian_articles_2024-03-10.json
//! ```

pub mod json;
