//! Domain Layer
//!
//! Pure migration rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (RepoPath, ChangeSource, CutoverDate)
//! - `services/` - Domain services (ScopeSet, ExtensionGuard, report formatting)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never spawns processes or touches the repository
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - Version control, type checking and linting go through trait-defined ports

pub mod ports;
pub mod services;
pub mod value_objects;
