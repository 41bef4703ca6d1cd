//! Injectable Registry System
//!
//! Declares where injectable implementations and external modules come from.
//! Uses the `linkme` crate for compile-time registration of entries that are
//! looked up by name when service descriptors are registered.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Implementation Registration Flow                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Crate defines:     #[linkme::distributed_slice(IMPLEMENTATIONS)]
//! │                        static ENTRY: ImplementationEntry = ...  │
//! │                              ↓                                  │
//! │  2. Registry collects: ImplementationRegistry::from_linked()    │
//! │                              ↓                                  │
//! │  3. Registrar queries: registry.resolve("app/services/mailer")  │
//! │                              ↓                                  │
//! │  4. Container builds:  (entry.factory)(&injected_arguments)     │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use wirekit_application::{IMPLEMENTATIONS, ImplementationEntry};
//! use wirekit_domain::value_objects::Instance;
//!
//! #[linkme::distributed_slice(IMPLEMENTATIONS)]
//! static MAILER: ImplementationEntry = ImplementationEntry {
//!     path: "app/services/mailer",
//!     description: "SMTP mailer",
//!     parameters: &["host", "port"],
//!     factory: |args| Ok(Instance::new(Mailer::new(args.str(0)?, args.value(1)?))),
//! };
//! ```

pub mod arguments;
pub mod external;
pub mod implementation;

pub use arguments::InjectedArguments;
pub use external::{EXTERNAL_MODULES, ExternalModuleEntry, ExternalModuleRegistry};
pub use implementation::{
    IMPLEMENTATIONS, Implementation, ImplementationEntry, ImplementationRegistry,
    normalize_implementation_path,
};
