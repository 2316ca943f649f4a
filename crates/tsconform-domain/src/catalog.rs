//! The open rule catalog.
//!
//! Rules are added by appending a descriptor; the checker and pass never name a rule.

use crate::exemption::ExemptionEntry;
use crate::rule::Rule;
use crate::rules::{BanStringInitializedSets, EqualsNan, MustUsePromises, TrustedSinkRule};
use tsconform_types::ids;

pub type RuleFactory = fn(Vec<ExemptionEntry>) -> Box<dyn Rule>;

#[derive(Clone, Copy, Debug)]
pub struct RuleDescriptor {
    pub name: &'static str,
    pub code: u32,
    pub description: &'static str,
    pub factory: RuleFactory,
}

impl RuleDescriptor {
    pub fn instantiate(&self, entries: Vec<ExemptionEntry>) -> Box<dyn Rule> {
        (self.factory)(entries)
    }
}

pub fn builtin_rules() -> Vec<RuleDescriptor> {
    vec![
        RuleDescriptor {
            name: ids::RULE_TRUSTED_HTML_SINK,
            code: ids::CODE_TRUSTED_HTML_SINK,
            description: "Plain strings must not reach sinks that require TrustedHTML.",
            factory: |e| Box::new(TrustedSinkRule::html(e)),
        },
        RuleDescriptor {
            name: ids::RULE_TRUSTED_SCRIPT_SINK,
            code: ids::CODE_TRUSTED_SCRIPT_SINK,
            description: "Plain strings must not reach sinks that require TrustedScript.",
            factory: |e| Box::new(TrustedSinkRule::script(e)),
        },
        RuleDescriptor {
            name: ids::RULE_TRUSTED_SCRIPT_URL_SINK,
            code: ids::CODE_TRUSTED_SCRIPT_URL_SINK,
            description: "Plain strings must not reach sinks that require TrustedScriptURL.",
            factory: |e| Box::new(TrustedSinkRule::script_url(e)),
        },
        RuleDescriptor {
            name: ids::RULE_EQUALS_NAN,
            code: ids::CODE_EQUALS_NAN,
            description: "Comparisons against NaN are constant; use isNaN().",
            factory: |e| Box::new(EqualsNan::new(e)),
        },
        RuleDescriptor {
            name: ids::RULE_BAN_STRING_INITIALIZED_SETS,
            code: ids::CODE_BAN_STRING_INITIALIZED_SETS,
            description: "new Set(string) builds a set of characters.",
            factory: |e| Box::new(BanStringInitializedSets::new(e)),
        },
        RuleDescriptor {
            name: ids::RULE_MUST_USE_PROMISES,
            code: ids::CODE_MUST_USE_PROMISES,
            description: "Promises returned by calls must be awaited, used, or voided.",
            factory: |e| Box::new(MustUsePromises::new(e)),
        },
    ]
}

pub fn find_rule(name: &str) -> Option<RuleDescriptor> {
    builtin_rules().into_iter().find(|r| r.name == name)
}
