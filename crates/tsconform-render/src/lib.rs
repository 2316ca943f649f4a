//! Rendering for diagnostic output surfaces (compiler-style text, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod text;

pub use gha::render_github_annotations;
pub use text::{format_diagnostic, render_summary, render_text};
