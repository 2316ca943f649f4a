//! Built-in rules. Each one registers handlers on the shared checker and consults only
//! its own exemptions.

mod ban_string_initialized_sets;
mod equals_nan;
mod must_use_promises;
mod trusted_sink;
mod utils;


pub use ban_string_initialized_sets::BanStringInitializedSets;
pub use equals_nan::EqualsNan;
pub use must_use_promises::MustUsePromises;
pub use trusted_sink::TrustedSinkRule;
