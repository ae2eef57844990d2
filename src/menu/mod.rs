//! Menu module
//!
//! Role-specific sidebar navigation. Each role has its own fixed entry
//! order; entries are validated against the access policy so that a visible
//! entry is always one the role may open.

pub mod entries;
pub mod filter;

pub use entries::{Icon, MenuItem, NavigationEntry};
pub use filter::{BadgeSource, MenuFilter, NoBadges};
