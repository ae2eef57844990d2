//! Municipal Services Portal access gate
//!
//! Role-based access control for the portal's routes and sidebar.
//!
//! ## Features
//!
//! - **Six closed roles**: admin, finance, project manager, HR manager, clerk, citizen
//! - **One policy table** mapping each route to `open` or a role set, sealed on first use
//! - **Tri-state decisions**: allow, deny-unauthenticated, deny-forbidden
//! - **Per-role sidebars** validated against the policy, with live badge counts
//! - **Session lifecycle** with login/logout and a restorable session record
//! - **Flexible configuration** via TOML files and environment variables
//!
//! ## Example
//!
//! ```
//! use mms_gate::access_control::{AccessResolver, Decision, Identity, Role};
//!
//! let resolver = AccessResolver::municipal_portal();
//! let clerk = Identity::new("5", "Clerk Staff", "clerk@mms.gov", Role::Clerk);
//!
//! assert_eq!(resolver.decide(Some(&clerk), "/admin/permits").unwrap(), Decision::Allow);
//! assert_eq!(resolver.decide(Some(&clerk), "/admin/finance").unwrap(), Decision::DenyForbidden);
//! assert_eq!(resolver.decide(None, "/dashboard").unwrap(), Decision::DenyUnauthenticated);
//! ```

pub mod access_control;
pub mod config;
pub mod error;
pub mod gate;
pub mod menu;
pub mod notifications;
pub mod session;
pub mod util;

// Re-export main types
pub use access_control::{AccessResolver, Decision, Identity, Role};
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result};
pub use gate::{Gate, GateOutcome, RenderPass};
pub use menu::{BadgeSource, MenuFilter, NavigationEntry};
pub use session::{IdentitySource, LocalSession, SessionProvider};
