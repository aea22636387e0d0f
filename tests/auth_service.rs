mod common;

use notes_web::{AuthService, Error, SessionManager};

use common::{session_config, store, TEST_BCRYPT_COST};

async fn service() -> AuthService {
    AuthService::new(
        store().await,
        SessionManager::new(&session_config()),
        TEST_BCRYPT_COST,
    )
}

#[tokio::test]
async fn register_stores_a_hash_not_the_password() {
    let auth = service().await;

    let user = auth.register("a@x.com", "pw1").await.unwrap();

    assert!(user.id > 0);
    assert_eq!(user.email, "a@x.com");
    assert_ne!(user.password, "pw1");
    assert!(user.password.starts_with("$2b$"));
}

#[tokio::test]
async fn duplicate_email_conflicts_and_leaves_original_intact() {
    let auth = service().await;
    let original = auth.register("a@x.com", "pw1").await.unwrap();

    let err = auth.register("a@x.com", "pw2").await.unwrap_err();
    assert!(matches!(err, Error::DuplicateEmail), "got {err:?}");

    // The first password still works and the second does not.
    let user = auth.authenticate("a@x.com", "pw1").await.unwrap();
    assert_eq!(user, original);
    assert!(matches!(
        auth.authenticate("a@x.com", "pw2").await,
        Err(Error::InvalidCredentials)
    ));
}

#[tokio::test]
async fn email_is_stored_as_submitted() {
    let auth = service().await;

    let upper = auth.register("Bob@x.com", "pw1").await.unwrap();
    let lower = auth.register("bob@x.com", "pw2").await.unwrap();

    assert_eq!(upper.email, "Bob@x.com");
    assert_ne!(upper.id, lower.id);
    assert_eq!(auth.authenticate("Bob@x.com", "pw1").await.unwrap().id, upper.id);
    assert!(matches!(
        auth.authenticate("Bob@x.com", "pw2").await,
        Err(Error::InvalidCredentials)
    ));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let auth = service().await;
    auth.register("a@x.com", "pw1").await.unwrap();

    let wrong_password = auth.authenticate("a@x.com", "nope").await.unwrap_err();
    let unknown_email = auth.authenticate("b@x.com", "pw1").await.unwrap_err();

    assert!(matches!(wrong_password, Error::InvalidCredentials));
    assert!(matches!(unknown_email, Error::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn authenticate_returns_the_registered_user() {
    let auth = service().await;
    let registered = auth.register("a@x.com", "pw1").await.unwrap();

    let user = auth.authenticate("a@x.com", "pw1").await.unwrap();
    assert_eq!(user.id, registered.id);
}
