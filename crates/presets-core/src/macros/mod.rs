//! Macro expansion
//!
//! Strings in a preset may reference values with `${name}`,
//! `$env{name}` or `$penv{name}`. Expansion runs the [`scanner`] over a
//! string repeatedly until nothing changes, bounded by
//! [`MAX_RESOLUTION_DEPTH`]. Unknown references and `$vendor{name}` are
//! left as written.

pub mod context;
pub mod resolver;
pub mod scanner;

pub use context::{MacroContext, host_system_name, path_list_separator};
pub use resolver::{MAX_RESOLUTION_DEPTH, MacroDiagnostic, MacroResolver, ResolvedPreset};
pub use scanner::{MacroNamespace, Segment, has_pending_macros, scan, vendor_macros};
