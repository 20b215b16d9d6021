use prakriti_core::model::{AnswerSheet, Dosha, DoshaResult, Gender, QuestionBank, User};
use prakriti_core::time::fixed_now;
use services::Session;
use storage::repository::AssessmentRepository;

use super::test_harness::{ViewKind, setup_view_harness};

fn test_user(id: u64) -> User {
    User::from_persisted(
        prakriti_core::model::UserId::new(id),
        "Asha".into(),
        "asha@example.com".into(),
        34,
        Gender::Female,
        "Teacher".into(),
        "Pune".into(),
        fixed_now(),
    )
    .expect("valid user")
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_both_tabs() {
    let mut harness = setup_view_harness(ViewKind::Login, None).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign in"), "missing sign-in tab in {html}");
    assert!(html.contains("Register"), "missing register tab in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_prompts_for_assessment_without_result() {
    let user = test_user(1);
    let mut harness =
        setup_view_harness(ViewKind::Results, Some(Session::User(user))).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("not completed the assessment"),
        "missing empty-state prompt in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_dominant_dosha() {
    let user = test_user(1);
    let mut harness =
        setup_view_harness(ViewKind::Results, Some(Session::User(user.clone()))).await;

    let mut answers = AnswerSheet::new();
    for question in QuestionBank::builtin().questions() {
        answers.select(question.id(), 1);
    }
    harness
        .services
        .assessments()
        .complete(user.id(), &answers)
        .await
        .expect("store result");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Dominant dosha: Pitta"),
        "missing dominant label in {html}"
    );
    assert!(html.contains("100%"), "missing percentage in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn diet_view_smoke_lists_meals_for_stored_result() {
    let user = test_user(1);
    let mut harness =
        setup_view_harness(ViewKind::Diet, Some(Session::User(user.clone()))).await;

    harness
        .storage
        .assessments
        .save_result(
            user.id(),
            &DoshaResult {
                vata: 100,
                pitta: 0,
                kapha: 0,
                dominant: Dosha::Vata,
            },
        )
        .await
        .expect("store result");

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Breakfast"), "missing breakfast in {html}");
    assert!(html.contains("Vata"), "missing dosha name in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_renders_statistics() {
    let admin = prakriti_core::model::AdminAccount::new(
        prakriti_core::model::AdminId::new(1),
        "admin@ayurveda.com",
        "System Administrator",
    );
    let mut harness =
        setup_view_harness(ViewKind::Admin, Some(Session::Admin(admin))).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Admin Dashboard"), "missing title in {html}");
    assert!(
        html.contains("Completed assessments"),
        "missing stat card in {html}"
    );
    assert!(html.contains("System settings"), "missing settings in {html}");
}
