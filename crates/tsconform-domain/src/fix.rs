//! Suggested fixes attached to findings.
//!
//! Fixes are metadata only: nothing here edits files. Downstream consumers may not
//! understand structured edits, so [`render_fixes`] turns them into plain text that is
//! appended to the diagnostic message.

use crate::model::{LineMap, SourceFile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextChange {
    pub start: u32,
    pub end: u32,
    pub replacement: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fix {
    pub changes: Vec<TextChange>,
}

impl Fix {
    pub fn replace(start: u32, end: u32, replacement: impl Into<String>) -> Self {
        Self {
            changes: vec![TextChange {
                start,
                end,
                replacement: replacement.into(),
            }],
        }
    }

    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        Self::replace(at, at, text)
    }
}

pub fn render_fixes(fixes: &[Fix], file: &SourceFile, lines: &LineMap) -> Option<String> {
    let changes: Vec<&TextChange> = fixes.iter().flat_map(|f| f.changes.iter()).collect();
    if changes.is_empty() {
        return None;
    }

    let mut out = String::from(if fixes.len() > 1 {
        "Suggested fixes:"
    } else {
        "Suggested fix:"
    });
    for change in changes {
        let (sl, sc) = lines.line_col(&file.text, change.start);
        if change.start == change.end {
            out.push_str(&format!(
                "\n- Insert at (line {sl}, col {sc}): {}",
                change.replacement
            ));
        } else {
            let (el, ec) = lines.line_col(&file.text, change.end);
            out.push_str(&format!(
                "\n- Replace the full text from (line {sl}, col {sc}) to (line {el}, col {ec}) with: {}",
                change.replacement
            ));
        }
    }
    Some(out)
}
