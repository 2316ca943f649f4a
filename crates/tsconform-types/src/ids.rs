//! Stable identifiers for rules and diagnostic codes.
//!
//! Rule names are kebab-case and double as exemption-file keys. Codes live in the
//! `TS<code>` space so conformance output reads like the compiler's own.

// Rules
pub const RULE_TRUSTED_HTML_SINK: &str = "ban-bare-string-to-trusted-html-sink";
pub const RULE_TRUSTED_SCRIPT_SINK: &str = "ban-bare-string-to-trusted-script-sink";
pub const RULE_TRUSTED_SCRIPT_URL_SINK: &str = "ban-bare-string-to-trusted-script-url-sink";
pub const RULE_EQUALS_NAN: &str = "equals-nan";
pub const RULE_BAN_STRING_INITIALIZED_SETS: &str = "ban-string-initialized-sets";
pub const RULE_MUST_USE_PROMISES: &str = "must-use-promises";

// Codes: conformance rules
pub const CODE_TRUSTED_HTML_SINK: u32 = 21222;
pub const CODE_TRUSTED_SCRIPT_SINK: u32 = 21223;
pub const CODE_TRUSTED_SCRIPT_URL_SINK: u32 = 21224;
pub const CODE_EQUALS_NAN: u32 = 21225;
pub const CODE_BAN_STRING_INITIALIZED_SETS: u32 = 21226;
pub const CODE_MUST_USE_PROMISES: u32 = 21227;

// Codes: tool-level
pub const CODE_EXEMPTION_CONFIG: u32 = 21220;
pub const CODE_INVALID_TYPED_TREE: u32 = 21221;
pub const CODE_CONFIG_ERROR: u32 = 5083;
pub const CODE_FILE_NOT_FOUND: u32 = 6053;
pub const CODE_EMIT_FAILED: u32 = 5033;
