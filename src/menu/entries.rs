//! Navigation entries and the per-role sidebar layouts.

use crate::access_control::{ResourceId, Role};
use serde::Serialize;
use std::fmt;

/// Sidebar affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Dashboard,
    Users,
    FileText,
    Dollar,
    Building,
    UserCog,
    Calendar,
    BarChart,
    ClipboardList,
    CreditCard,
    Bell,
}

impl Icon {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Icon::Dashboard => "dashboard",
            Icon::Users => "users",
            Icon::FileText => "file_text",
            Icon::Dollar => "dollar",
            Icon::Building => "building",
            Icon::UserCog => "user_cog",
            Icon::Calendar => "calendar",
            Icon::BarChart => "bar_chart",
            Icon::ClipboardList => "clipboard_list",
            Icon::CreditCard => "credit_card",
            Icon::Bell => "bell",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A menu slot before badges are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub resource: ResourceId,
    pub icon: Icon,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, resource: ResourceId, icon: Icon) -> Self {
        Self {
            label: label.into(),
            resource,
            icon,
        }
    }
}

/// One visible sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub label: String,
    pub resource: ResourceId,
    pub icon: Icon,
    /// Derived at call time; `None` when the count is zero
    pub badge: Option<u32>,
}

const DASHBOARD: (&str, &str, Icon) = ("Dashboard", "/dashboard", Icon::Dashboard);
const NOTIFICATIONS: (&str, &str, Icon) = ("Notifications", "/notifications", Icon::Bell);
const CITIZEN_SERVICES: (&str, &str, Icon) =
    ("Citizen Services", "/admin/citizen-services", Icon::Users);
const PERMITS: (&str, &str, Icon) = ("Permits", "/admin/permits", Icon::FileText);
const FINANCE: (&str, &str, Icon) = ("Finance", "/admin/finance", Icon::Dollar);
const PROJECTS: (&str, &str, Icon) = ("Projects", "/admin/projects", Icon::Building);
const HUMAN_RESOURCES: (&str, &str, Icon) = ("Human Resources", "/admin/hr", Icon::UserCog);
const EVENTS: (&str, &str, Icon) = ("Events", "/admin/events", Icon::Calendar);
const REPORTS: (&str, &str, Icon) = ("Reports", "/admin/reports", Icon::BarChart);

/// Canonical sidebar order for each role
///
/// Each role has its own explicit order; lists are never sorted or merged.
pub(crate) fn municipal_portal_layout(role: Role) -> Vec<MenuItem> {
    let slots: &[(&str, &str, Icon)] = match role {
        Role::Citizen => &[
            DASHBOARD,
            ("My Requests", "/citizen/requests", Icon::ClipboardList),
            ("My Permits", "/citizen/permits", Icon::FileText),
            ("My Payments", "/citizen/payments", Icon::CreditCard),
            NOTIFICATIONS,
        ],
        Role::Admin => &[
            DASHBOARD,
            CITIZEN_SERVICES,
            PERMITS,
            FINANCE,
            PROJECTS,
            HUMAN_RESOURCES,
            EVENTS,
            REPORTS,
            NOTIFICATIONS,
        ],
        Role::Finance => &[DASHBOARD, FINANCE, REPORTS, NOTIFICATIONS],
        Role::ProjectManager => &[DASHBOARD, PROJECTS, REPORTS, NOTIFICATIONS],
        Role::HrManager => &[DASHBOARD, HUMAN_RESOURCES, REPORTS, NOTIFICATIONS],
        Role::Clerk => &[DASHBOARD, CITIZEN_SERVICES, PERMITS, NOTIFICATIONS],
    };

    slots
        .iter()
        .map(|&(label, resource, icon)| MenuItem::new(label, ResourceId::from_static(resource), icon))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_starts_with_dashboard_and_ends_with_notifications() {
        for role in Role::all() {
            let layout = municipal_portal_layout(*role);
            assert_eq!(layout.first().unwrap().resource.as_str(), "/dashboard");
            assert_eq!(layout.last().unwrap().resource.as_str(), "/notifications");
        }
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(municipal_portal_layout(Role::Citizen).len(), 5);
        assert_eq!(municipal_portal_layout(Role::Admin).len(), 9);
        assert_eq!(municipal_portal_layout(Role::Finance).len(), 4);
        assert_eq!(municipal_portal_layout(Role::ProjectManager).len(), 4);
        assert_eq!(municipal_portal_layout(Role::HrManager).len(), 4);
        assert_eq!(municipal_portal_layout(Role::Clerk).len(), 4);
    }

    #[test]
    fn test_icon_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Icon::ClipboardList).unwrap(),
            r#""clipboard_list""#
        );
    }
}
