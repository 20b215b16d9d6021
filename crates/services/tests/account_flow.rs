use prakriti_core::model::{Gender, Registration, UserUpdate};
use prakriti_core::time::fixed_clock;
use services::{AccountError, AppServices, DEFAULT_ADMIN_EMAIL, Session};

async fn app(db_name: &str) -> AppServices {
    let url = format!("sqlite:file:{db_name}?mode=memory&cache=shared");
    AppServices::new_sqlite(&url, fixed_clock())
        .await
        .expect("build services")
}

fn registration(email: &str) -> Registration {
    Registration {
        name: "Meera".into(),
        email: email.into(),
        credential: "lotus-pond".into(),
        age: 29,
        gender: Gender::Female,
        occupation: "Designer".into(),
        location: "Kochi".into(),
    }
}

#[tokio::test]
async fn account_flow_register_sign_in_update() {
    let services = app("memdb_account_flow").await;
    let accounts = services.accounts();

    let session = accounts
        .register(registration("meera@example.com"))
        .await
        .expect("register");
    let Session::User(user) = session else {
        panic!("registration should sign in as a user");
    };

    let signed_in = accounts
        .authenticate("meera@example.com", "lotus-pond")
        .await
        .expect("sign in");
    assert_eq!(signed_in.user().map(|u| u.id()), Some(user.id()));

    let updated = accounts
        .update_profile(
            user.id(),
            UserUpdate {
                occupation: Some("Architect".into()),
                ..UserUpdate::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.occupation(), "Architect");
    assert_eq!(updated.email(), "meera@example.com");

    let err = accounts
        .register(registration("meera@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::EmailTaken));
}

#[tokio::test]
async fn admin_email_always_yields_admin_session() {
    let services = app("memdb_admin_session").await;
    let accounts = services.accounts();

    let session = accounts
        .authenticate(DEFAULT_ADMIN_EMAIL, "admin123")
        .await
        .expect("admin sign in");
    assert!(session.is_admin());
    assert!(session.user().is_none());

    let err = accounts
        .authenticate(DEFAULT_ADMIN_EMAIL, "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidCredentials));
}
