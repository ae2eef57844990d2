//! Route/render gate
//!
//! Maps access decisions to what the routing layer does: render the page,
//! send the visitor to the login screen, or send a signed-in user back to
//! their dashboard. A forbidden route is answered with the same redirect as
//! any other denied page so its existence is not revealed.

use crate::access_control::{AccessResolver, Decision, Identity, ResourceId, Role};
use crate::config::AccessControlConfig;
use crate::error::ConfigError;
use crate::menu::{BadgeSource, MenuFilter, NavigationEntry};
use crate::session::IdentitySource;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Route of the sign-in screen
pub const LOGIN_ROUTE: &str = "/login";

/// Landing route after sign-in and after a forbidden navigation
pub const HOME_ROUTE: &str = "/dashboard";

/// What the routing layer should do with a navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum GateOutcome {
    Render,
    RedirectToLogin,
    RedirectToHome(ResourceId),
}

impl GateOutcome {
    pub fn from_decision(decision: Decision) -> Self {
        match decision {
            Decision::Allow => GateOutcome::Render,
            Decision::DenyUnauthenticated => GateOutcome::RedirectToLogin,
            Decision::DenyForbidden => GateOutcome::RedirectToHome(ResourceId::from_static(HOME_ROUTE)),
        }
    }

    /// Route to navigate to, or `None` when the page renders
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GateOutcome::Render => None,
            GateOutcome::RedirectToLogin => Some(LOGIN_ROUTE),
            GateOutcome::RedirectToHome(home) => Some(home.as_str()),
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, GateOutcome::Render)
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.redirect_target() {
            None => write!(f, "render"),
            Some(target) => write!(f, "redirect {}", target),
        }
    }
}

/// Dashboard variant shown on the home route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    Admin,
    Finance,
    Projects,
    HumanResources,
    Clerk,
    Citizen,
}

impl DashboardView {
    /// Dashboard for a raw role tag; unrecognized tags get the citizen view
    pub fn for_tag(tag: &str) -> Self {
        match Role::try_parse(tag) {
            Some(role) => role.dashboard(),
            None => {
                warn!(tag, "Unknown role tag, using citizen dashboard");
                DashboardView::Citizen
            }
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            DashboardView::Admin => "Admin Dashboard",
            DashboardView::Finance => "Finance Dashboard",
            DashboardView::Projects => "Projects Dashboard",
            DashboardView::HumanResources => "HR Dashboard",
            DashboardView::Clerk => "Clerk Dashboard",
            DashboardView::Citizen => "My Dashboard",
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl Role {
    pub const fn dashboard(&self) -> DashboardView {
        match self {
            Role::Admin => DashboardView::Admin,
            Role::Finance => DashboardView::Finance,
            Role::ProjectManager => DashboardView::Projects,
            Role::HrManager => DashboardView::HumanResources,
            Role::Clerk => DashboardView::Clerk,
            Role::Citizen => DashboardView::Citizen,
        }
    }
}

/// Result of evaluating one navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPass {
    /// The snapshot every other field was derived from
    pub identity: Option<Identity>,
    pub decision: Decision,
    pub outcome: GateOutcome,
    /// Sidebar for the signed-in role; empty when signed out
    pub menu: Vec<NavigationEntry>,
    pub dashboard: Option<DashboardView>,
}

/// Decision-to-outcome gate shared by every route
#[derive(Debug, Clone)]
pub struct Gate {
    resolver: Arc<AccessResolver>,
    menu: Arc<MenuFilter>,
}

impl Gate {
    pub fn new(resolver: Arc<AccessResolver>, menu: Arc<MenuFilter>) -> Self {
        Self { resolver, menu }
    }

    /// Gate over the built-in route table and sidebars
    pub fn municipal_portal() -> Self {
        Self::with_resolver(AccessResolver::municipal_portal())
    }

    /// Gate over a configured route table
    ///
    /// Sidebar entries for routes the configuration disables or leaves out
    /// are hidden rather than rejected.
    pub fn from_config(config: &AccessControlConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_resolver(AccessResolver::from_config(config)?))
    }

    /// Gate with the portal sidebars pruned against `resolver`'s table
    pub fn with_resolver(resolver: AccessResolver) -> Self {
        let menu = MenuFilter::municipal_portal(resolver.policy());
        Self::new(Arc::new(resolver), Arc::new(menu))
    }

    pub fn resolver(&self) -> &AccessResolver {
        &self.resolver
    }

    pub fn menu(&self) -> &MenuFilter {
        &self.menu
    }

    /// Outcome for an explicit identity
    pub fn evaluate(
        &self,
        identity: Option<&Identity>,
        resource: &str,
    ) -> Result<GateOutcome, ConfigError> {
        let decision = self.resolver.decide(identity, resource)?;
        Ok(GateOutcome::from_decision(decision))
    }

    /// Evaluate a navigation against a single identity snapshot
    ///
    /// The identity is read once; the decision, menu and dashboard all come
    /// from that same value, so a concurrent logout cannot produce a page
    /// rendered for one user with another user's sidebar.
    pub fn render_pass(
        &self,
        source: &dyn IdentitySource,
        resource: &str,
        badges: &dyn BadgeSource,
    ) -> Result<RenderPass, ConfigError> {
        let identity = source.current_identity();
        let decision = self.resolver.decide(identity.as_ref(), resource)?;
        let outcome = GateOutcome::from_decision(decision);

        let (menu, dashboard) = match &identity {
            Some(identity) => (
                self.menu.visible_menu(identity.role, badges),
                Some(identity.role.dashboard()),
            ),
            None => (Vec::new(), None),
        };

        debug!(resource, outcome = %outcome, "Render pass");
        Ok(RenderPass {
            identity,
            decision,
            outcome,
            menu,
            dashboard,
        })
    }
}
