//! Menu filter
//!
//! Derives the ordered sidebar for a role. Layouts are pruned against the
//! access policy once, at construction, so a menu never links to a route the
//! role would be denied.

use crate::access_control::{AccessPolicyTable, Role};
use crate::menu::entries::{MenuItem, NavigationEntry, municipal_portal_layout};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Supplier of badge counts keyed by resource (e.g. unread notifications)
pub trait BadgeSource {
    fn count_for(&self, resource: &str) -> u32;
}

/// Badge source that never shows a badge
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBadges;

impl BadgeSource for NoBadges {
    fn count_for(&self, _resource: &str) -> u32 {
        0
    }
}

impl<F> BadgeSource for F
where
    F: Fn(&str) -> u32,
{
    fn count_for(&self, resource: &str) -> u32 {
        self(resource)
    }
}

/// Per-role ordered menus
#[derive(Debug, Clone)]
pub struct MenuFilter {
    layouts: HashMap<Role, Vec<MenuItem>>,
}

impl MenuFilter {
    /// Build from explicit layouts, pruned against the policy
    ///
    /// An item is kept only when its resource is registered and permits the
    /// role whose menu it appears in. Kept items stay in layout order.
    pub fn new(layouts: HashMap<Role, Vec<MenuItem>>, policy: &AccessPolicyTable) -> Self {
        let layouts = layouts
            .into_iter()
            .map(|(role, items)| {
                let items = items
                    .into_iter()
                    .filter(|item| Self::is_reachable(policy, role, item))
                    .collect();
                (role, items)
            })
            .collect();
        Self { layouts }
    }

    /// The portal sidebar for every role
    pub fn municipal_portal(policy: &AccessPolicyTable) -> Self {
        let layouts = Role::all()
            .iter()
            .map(|role| (*role, municipal_portal_layout(*role)))
            .collect();
        Self::new(layouts, policy)
    }

    fn is_reachable(policy: &AccessPolicyTable, role: Role, item: &MenuItem) -> bool {
        match policy.roles_for(item.resource.as_str()) {
            Ok(resource_policy) if resource_policy.permits(role) => true,
            Ok(resource_policy) => {
                debug!(
                    role = %role,
                    resource = %item.resource,
                    policy = %resource_policy,
                    "Menu entry hidden"
                );
                false
            }
            Err(e) => {
                warn!(role = %role, label = %item.label, error = %e, "Menu entry dropped");
                false
            }
        }
    }

    /// Ordered entries visible to `role`
    ///
    /// Returns a fresh vector on every call. Badges are read from `badges`
    /// each time and never cached. A role with no layout gets the citizen
    /// menu.
    pub fn visible_menu(&self, role: Role, badges: &dyn BadgeSource) -> Vec<NavigationEntry> {
        let items = match self.layouts.get(&role) {
            Some(items) => items.as_slice(),
            None => self.fallback_items(),
        };

        items
            .iter()
            .map(|item| {
                let count = badges.count_for(item.resource.as_str());
                NavigationEntry {
                    label: item.label.clone(),
                    resource: item.resource.clone(),
                    icon: item.icon,
                    badge: (count > 0).then_some(count),
                }
            })
            .collect()
    }

    /// Menu for a raw role tag; unrecognized tags get the citizen menu
    pub fn visible_menu_for_tag(&self, tag: &str, badges: &dyn BadgeSource) -> Vec<NavigationEntry> {
        let role = Role::try_parse(tag).unwrap_or_else(|| {
            warn!(tag, "Unknown role tag, using citizen menu");
            Role::Citizen
        });
        self.visible_menu(role, badges)
    }

    fn fallback_items(&self) -> &[MenuItem] {
        self.layouts
            .get(&Role::Citizen)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
