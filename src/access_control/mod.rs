//! Access control module
//!
//! Role-based gating of portal routes.
//!
//! ## Access Control Model
//!
//! Every protected route is declared once in the [`AccessPolicyTable`] with
//! one of two policies:
//!
//! - **Open**: any signed-in identity may open it (never an anonymous visitor)
//! - **Restricted**: only the listed roles may open it. An empty role set
//!   disables the route for everyone, which is different from Open.
//!
//! The [`AccessResolver`] turns (identity-or-none, route) into a [`Decision`]:
//!
//! ```text
//! no identity             → DenyUnauthenticated
//! unregistered route      → ConfigError (never a silent allow/deny)
//! open / role in set      → Allow
//! otherwise               → DenyForbidden
//! ```
//!
//! The first decision seals the table; registering afterwards fails.
//!
//! ## Example Configuration
//!
//! ```toml
//! [access_control]
//! builtin = true                          # start from the portal route table
//!
//! [access_control.resources."/admin/audit"]
//! roles = ["admin", "finance"]
//!
//! [access_control.resources."/help"]
//! access = "open"
//!
//! [access_control.resources."/admin/events"]
//! access = "disabled"                     # temporarily off for every role
//! ```

pub mod policy;
pub mod resolver;
pub mod types;

pub use policy::AccessPolicyTable;
pub use resolver::AccessResolver;
pub use types::{Decision, Identity, ResourceId, ResourcePolicy, Role};
