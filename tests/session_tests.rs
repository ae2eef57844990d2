//! Session lifecycle integration tests

use mms_gate::access_control::{Identity, Role};
use mms_gate::config::load_config_from_str;
use mms_gate::error::AuthError;
use mms_gate::session::{
    CredentialDirectory, FileSessionStore, IdentitySource, LocalSession, MemorySessionStore,
    SessionProvider, SessionStore,
};
use std::sync::Arc;
use tempfile::tempdir;

fn demo() -> Arc<CredentialDirectory> {
    Arc::new(CredentialDirectory::demo())
}

#[rstest::rstest]
#[case("admin@mms.gov", "admin123", Role::Admin)]
#[case("finance@mms.gov", "finance123", Role::Finance)]
#[case("project@mms.gov", "project123", Role::ProjectManager)]
#[case("hr@mms.gov", "hr123", Role::HrManager)]
#[case("clerk@mms.gov", "clerk123", Role::Clerk)]
#[case("citizen@example.com", "citizen123", Role::Citizen)]
fn test_demo_accounts(#[case] email: &str, #[case] password: &str, #[case] role: Role) {
    let mut session = LocalSession::new(demo());
    let identity = session.login(email, password).unwrap();
    assert_eq!(identity.role, role);
    assert_eq!(session.current_identity().map(|i| i.role), Some(role));
}

#[test]
fn test_email_is_case_insensitive() {
    let mut session = LocalSession::new(demo());
    assert!(session.login("Finance@MMS.gov", "finance123").is_ok());
}

#[test]
fn test_unknown_account_is_rejected() {
    let mut session = LocalSession::new(demo());
    assert!(matches!(
        session.login("mayor@mms.gov", "mayor123"),
        Err(AuthError::InvalidCredentials)
    ));
    assert!(!session.is_authenticated());
}

#[test]
fn test_inactive_account_cannot_log_in() {
    let config = load_config_from_str(
        r#"
[accounts]
demo = false

[[accounts.users]]
id = "7"
name = "Former Clerk"
email = "former@mms.gov"
role = "clerk"
password = "former123"
status = "inactive"
"#,
    )
    .unwrap();
    let directory = CredentialDirectory::from_config(&config.accounts).unwrap();
    let mut session = LocalSession::new(Arc::new(directory));

    assert!(matches!(
        session.login("former@mms.gov", "former123"),
        Err(AuthError::AccountInactive { .. })
    ));
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));

    let mut session = LocalSession::restore(demo(), &store).await.unwrap();
    assert!(!session.is_authenticated());
    let identity = session.login("project@mms.gov", "project123").unwrap();
    session.persist(&store).await.unwrap();

    let restored = LocalSession::restore(demo(), &store).await.unwrap();
    assert_eq!(restored.current_identity(), Some(identity));
}

#[tokio::test]
async fn test_logout_clears_stored_session() {
    let store = MemorySessionStore::new();

    let mut session = LocalSession::new(demo());
    session.login("hr@mms.gov", "hr123").unwrap();
    session.persist(&store).await.unwrap();

    session.logout();
    session.persist(&store).await.unwrap();

    assert!(store.load().await.unwrap().is_none());
    let restored = LocalSession::restore(demo(), &store).await.unwrap();
    assert!(!restored.is_authenticated());
}

#[tokio::test]
async fn test_corrupt_session_file_is_discarded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"id": "1", "role": "#).unwrap();
    let store = FileSessionStore::new(&path);

    let session = LocalSession::restore(demo(), &store).await.unwrap();
    assert!(!session.is_authenticated());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_unknown_role_in_session_file_is_discarded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(
        &path,
        r#"{"id":"1","name":"Admin User","email":"admin@mms.gov","role":"superuser"}"#,
    )
    .unwrap();
    let store = FileSessionStore::new(&path);

    let session = LocalSession::restore(demo(), &store).await.unwrap();
    assert!(session.current_identity().is_none());
}

#[tokio::test]
async fn test_forged_role_is_discarded() {
    // A real account, but with a role it does not have
    let forged = Identity::new("6", "Citizen User", "citizen@example.com", Role::Admin);
    let store = MemorySessionStore::with_identity(forged);

    let session = LocalSession::restore(demo(), &store).await.unwrap();
    assert!(!session.is_authenticated());
    assert!(store.load().await.unwrap().is_none());
}
