//! shadow-report compiles raw test-run results (pass/fail/pending records)
//! into styled, formula-annotated spreadsheet reports: an ordered
//! header/body/footer cell matrix with summary formulas, merge instructions
//! for grouped rows, conditional-formatting rules highlighting failures, and
//! row/column styling — plus a monthly rollup folding multiple daily tabs
//! into one summary.
//!
//! The pipeline is two-phase: a pure compute phase derives an ordered list
//! of update operations from one immutable payload snapshot, and a
//! submission phase replays that list against the spreadsheet collaborator.

pub mod cli;
pub mod daily;
pub mod error;
pub mod monthly;
pub mod record;
pub mod report;
pub mod sheets;
pub mod styles;
