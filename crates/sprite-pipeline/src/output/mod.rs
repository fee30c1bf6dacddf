//! Pipeline output: the finished sprite plus per-stage diagnostics.
//!
//! [`PipelineReport`] records what each stage decided (skipped background
//! removal, candidate colors, removed pixel counts, color counts) and two
//! [`TransparencyCheck`]s, one after downscaling and one on the final
//! sprite. The checks never fail the run; they classify the result as
//! transparent, partial or opaque for logging and API responses.

mod report;

pub use report::{PipelineReport, TransparencyCheck, TransparencyVerdict};
