//! Route/render gate integration tests

use mms_gate::access_control::{Identity, Role};
use mms_gate::gate::{DashboardView, Gate, GateOutcome, HOME_ROUTE, LOGIN_ROUTE};
use mms_gate::menu::NoBadges;
use mms_gate::notifications::{Notification, NotificationCenter, NotificationKind};
use mms_gate::session::{CredentialDirectory, LocalSession, SessionProvider};
use std::sync::Arc;

fn signed_in(email: &str, password: &str) -> LocalSession {
    let mut session = LocalSession::new(Arc::new(CredentialDirectory::demo()));
    session.login(email, password).unwrap();
    session
}

#[test]
fn test_clerk_on_permits_renders() {
    let gate = Gate::municipal_portal();
    let session = signed_in("clerk@mms.gov", "clerk123");

    let pass = gate.render_pass(&session, "/admin/permits", &NoBadges).unwrap();
    assert_eq!(pass.outcome, GateOutcome::Render);
    assert_eq!(pass.dashboard, Some(DashboardView::Clerk));
    assert_eq!(pass.menu.len(), 4);
}

#[test]
fn test_clerk_on_finance_goes_home() {
    let gate = Gate::municipal_portal();
    let session = signed_in("clerk@mms.gov", "clerk123");

    let pass = gate.render_pass(&session, "/admin/finance", &NoBadges).unwrap();
    assert_eq!(pass.outcome.redirect_target(), Some(HOME_ROUTE));
}

#[test]
fn test_visitor_goes_to_login() {
    let gate = Gate::municipal_portal();
    let session = LocalSession::new(Arc::new(CredentialDirectory::demo()));

    let pass = gate.render_pass(&session, "/dashboard", &NoBadges).unwrap();
    assert_eq!(pass.outcome, GateOutcome::RedirectToLogin);
    assert_eq!(pass.outcome.redirect_target(), Some(LOGIN_ROUTE));
    assert!(pass.identity.is_none());
    assert!(pass.menu.is_empty());
}

#[test]
fn test_logout_then_navigate() {
    let gate = Gate::municipal_portal();
    let mut session = signed_in("admin@mms.gov", "admin123");
    assert!(gate.render_pass(&session, "/admin/events", &NoBadges).unwrap().outcome.is_render());

    session.logout();
    let pass = gate.render_pass(&session, "/admin/events", &NoBadges).unwrap();
    assert_eq!(pass.outcome, GateOutcome::RedirectToLogin);
}

#[test]
fn test_render_pass_carries_badges() {
    let gate = Gate::municipal_portal();
    let session = signed_in("citizen@example.com", "citizen123");
    let center = NotificationCenter::from_items(vec![Notification::new(
        "1",
        "6",
        "Request received",
        "We received your request",
        NotificationKind::Info,
        "2024-03-05T12:00:00Z",
    )]);

    let pass = gate.render_pass(&session, "/citizen/requests", &center).unwrap();
    assert!(pass.outcome.is_render());
    let notifications = pass
        .menu
        .iter()
        .find(|e| e.resource.as_str() == "/notifications")
        .unwrap();
    assert_eq!(notifications.badge, Some(1));
}

#[test]
fn test_dashboard_per_role() {
    let expected = [
        (Role::Admin, "Admin Dashboard"),
        (Role::Finance, "Finance Dashboard"),
        (Role::ProjectManager, "Projects Dashboard"),
        (Role::HrManager, "HR Dashboard"),
        (Role::Clerk, "Clerk Dashboard"),
        (Role::Citizen, "My Dashboard"),
    ];
    for (role, title) in expected {
        assert_eq!(role.dashboard().title(), title);
        assert_eq!(DashboardView::for_tag(role.as_str()), role.dashboard());
    }
    assert_eq!(DashboardView::for_tag(""), DashboardView::Citizen);
}

#[test]
fn test_evaluate_with_explicit_identity() {
    let gate = Gate::municipal_portal();
    let hr = Identity::new("4", "HR Manager", "hr@mms.gov", Role::HrManager);

    assert_eq!(gate.evaluate(Some(&hr), "/admin/hr").unwrap(), GateOutcome::Render);
    assert!(gate.evaluate(Some(&hr), "/admin/unknown").is_err());
}

#[test]
fn test_outcome_serializes_for_router() {
    let json = serde_json::to_value(GateOutcome::from_decision(
        mms_gate::access_control::Decision::DenyForbidden,
    ))
    .unwrap();
    assert_eq!(json["action"], "redirect_to_home");
    assert_eq!(json["target"], "/dashboard");
}
