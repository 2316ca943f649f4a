//! Rule-scoped suppressions for reviewed, not-yet-fixed call sites.
//!
//! Matching is deliberately narrow: globs never let `*` cross a `/`, prefixes only match
//! at segment boundaries, and an entry without patterns matches nothing.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::collections::BTreeMap;
use tsconform_types::RepoPath;

#[derive(Debug, thiserror::Error)]
pub enum ExemptionError {
    #[error("invalid path glob '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("invalid regexp '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// One suppression entry: a set of path matchers scoped to a single rule.
#[derive(Clone, Debug)]
pub struct ExemptionEntry {
    reason: Option<String>,
    globs: Option<GlobSet>,
    prefixes: Vec<String>,
    regexps: Vec<Regex>,
}

impl ExemptionEntry {
    pub fn new(
        reason: Option<String>,
        paths: &[String],
        prefixes: &[String],
        regexps: &[String],
    ) -> Result<Self, ExemptionError> {
        let globs = if paths.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in paths {
                let glob = GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map_err(|source| ExemptionError::Glob {
                        pattern: pattern.clone(),
                        source,
                    })?;
                builder.add(glob);
            }
            Some(builder.build().map_err(|source| ExemptionError::Glob {
                pattern: paths.join(", "),
                source,
            })?)
        };

        let regexps = regexps
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ExemptionError::Regex {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            reason,
            globs,
            prefixes: prefixes
                .iter()
                .filter(|p| !p.trim_end_matches('/').is_empty())
                .cloned()
                .collect(),
            regexps,
        })
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// True when the entry has no patterns at all (and therefore matches nothing).
    pub fn is_empty(&self) -> bool {
        self.globs.is_none() && self.prefixes.is_empty() && self.regexps.is_empty()
    }

    pub fn matches(&self, path: &RepoPath) -> bool {
        let s = path.as_str();
        self.globs.as_ref().is_some_and(|g| g.is_match(s))
            || self.prefixes.iter().any(|p| path.starts_with_segment(p))
            || self.regexps.iter().any(|r| r.is_match(s))
    }
}

/// Every exemption entry known to one invocation, keyed by rule name.
///
/// Built once, never mutated while checks run.
#[derive(Clone, Debug, Default)]
pub struct ExemptionList {
    entries: BTreeMap<String, Vec<ExemptionEntry>>,
}

impl ExemptionList {
    /// The zero-suppression default used when no exemption source is configured.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule: impl Into<String>, entry: ExemptionEntry) {
        self.entries.entry(rule.into()).or_default().push(entry);
    }

    /// The first entry registered for `rule`, if any.
    pub fn lookup(&self, rule: &str) -> Option<&ExemptionEntry> {
        self.entries_for(rule).first()
    }

    pub fn entries_for(&self, rule: &str) -> &[ExemptionEntry] {
        self.entries.get(rule).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A rule's own view of the entries scoped to it.
#[derive(Clone, Debug, Default)]
pub struct Exemptions(Vec<ExemptionEntry>);

impl Exemptions {
    pub fn new(entries: Vec<ExemptionEntry>) -> Self {
        Self(entries)
    }

    pub fn is_exempt(&self, path: &RepoPath) -> bool {
        self.0.iter().any(|e| e.matches(path))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
