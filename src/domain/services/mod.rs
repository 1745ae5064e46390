//! Domain Services
//!
//! Pure business logic services that operate on domain values.
//! These services have no I/O dependencies and are easily testable.

mod diagnostics;
mod extension_guard;
pub mod porcelain;
mod scope_set;
mod stylish;

pub use diagnostics::format_diagnostics;
pub use extension_guard::{ExtensionGuard, GuardReport, GuardViolation};
pub use porcelain::parse_status;
pub use scope_set::ScopeSet;
pub use stylish::format_stylish;
