use prakriti_core::model::{Dosha, FollowUpDraft, Gender, Registration};
use prakriti_core::time::fixed_clock;
use services::{AppServices, AssessmentFlow};

async fn app(db_name: &str) -> AppServices {
    let url = format!("sqlite:file:{db_name}?mode=memory&cache=shared");
    AppServices::new_sqlite(&url, fixed_clock())
        .await
        .expect("build services")
}

#[tokio::test]
async fn assessment_journey_from_registration_to_dashboard() {
    let services = app("memdb_assessment_journey").await;

    let session = services
        .accounts()
        .register(Registration {
            name: "Arjun".into(),
            email: "arjun@example.com".into(),
            credential: "river-stone".into(),
            age: 41,
            gender: Gender::Male,
            occupation: "Chef".into(),
            location: "Jaipur".into(),
        })
        .await
        .expect("register");
    let user_id = session.user().expect("user session").id();

    // Walk the full questionnaire, always picking the pitta option.
    let mut flow = AssessmentFlow::builtin();
    for _ in 0..flow.bank().len() {
        flow.select(1).expect("pitta choice");
        flow.next();
    }
    assert!(flow.is_complete());

    let assessments = services.assessments();
    let result = assessments
        .complete(user_id, flow.answers())
        .await
        .expect("score");
    assert_eq!(result.dominant, Dosha::Pitta);
    assert_eq!(result.pitta, 100);

    let stored = assessments
        .stored_result(user_id)
        .await
        .expect("stored")
        .expect("present");
    assert_eq!(stored, result);

    services
        .follow_ups()
        .submit(
            user_id,
            FollowUpDraft {
                improvements: vec!["less acidity".into()],
                energy: 7,
                sleep: 6,
                digestion: 8,
                notes: "following the cooling diet".into(),
                ..FollowUpDraft::default()
            },
        )
        .await
        .expect("follow-up");

    let stats = services.admin().statistics().await.expect("statistics");
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.completed_assessments, 1);
    assert_eq!(stats.total_follow_ups, 1);
    assert_eq!(stats.dosha_distribution.pitta, 1);

    // Retake from scratch.
    assessments.reset(user_id).await.expect("reset");
    assert_eq!(
        assessments.stored_result(user_id).await.expect("stored"),
        None
    );
}

#[tokio::test]
async fn export_then_import_restores_the_journey() {
    let services = app("memdb_export_journey").await;

    let session = services
        .accounts()
        .register(Registration {
            name: "Lata".into(),
            email: "lata@example.com".into(),
            credential: "monsoon".into(),
            age: 35,
            gender: Gender::Female,
            occupation: "Writer".into(),
            location: "Indore".into(),
        })
        .await
        .expect("register");
    let user_id = session.user().expect("user").id();

    let mut answers = prakriti_core::model::AnswerSheet::new();
    let bank = prakriti_core::model::QuestionBank::builtin();
    for question in bank.questions() {
        answers.select(question.id(), 2);
    }
    services
        .assessments()
        .complete(user_id, &answers)
        .await
        .expect("score");

    let json = services.export().export_json().await.expect("export");

    let restored = app("memdb_import_journey").await;
    let report = restored
        .export()
        .import_json(&json)
        .await
        .expect("import");
    assert_eq!(report.users, 1);
    assert_eq!(report.results, 1);

    let rows = restored.admin().list_users().await.expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user.email(), "lata@example.com");
    assert_eq!(rows[0].result.map(|r| r.dominant), Some(Dosha::Kapha));
}
