//! Use case orchestration for tsconform.
//!
//! This crate is the build orchestrator: it picks a build mode, wires the conformance
//! pass into the host's build, and derives the exit status. The CLI crate depends on
//! this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod conform;
mod direct;
mod exemptions;
mod mode;
mod report;
mod rules;
mod solution;
mod strategy;

pub use direct::{DirectBuild, DirectInput};
pub use exemptions::load_exemptions;
pub use mode::{Mode, select_mode};
pub use report::{build_report, serialize_report, write_report};
pub use rules::format_rule_list;
pub use solution::{SolutionBuild, UsageError};
pub use strategy::{BUILD_FAILED_NOTICE, BuildOutcome, BuildStrategy, run_build};
