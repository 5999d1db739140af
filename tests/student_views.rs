mod support;

use serde_json::json;

use admission_portal::models::{Application, DecisionStatus, PaymentStatus};
use admission_portal::routes::{History, Route};
use admission_portal::ui::{Action, Element};
use admission_portal::views::{
    Loadable, MakePaymentView, StudentAdmissionView, StudentApplicationView,
    StudentApplicationsView, View,
};

use support::{from_json, FakeBackend};

fn full_application(status: &str) -> Application {
    from_json(json!({
        "applicationId": "456",
        "applicantFullName": "John Doe",
        "dateOfBirth": "2000-01-01",
        "highestQualification": "Bachelor's Degree",
        "finalYearPercentage": "85%",
        "goals": "Become a software engineer",
        "emailId": "johndoe@example.com",
        "applicationStatus": status,
        "dateOfInterview": "2024-06-10",
        "schedule": {
            "startDate": "2024-09-01",
            "endDate": "2025-06-30",
            "programScheduledResponseDto": {
                "name": "Test University",
                "collegeName": "Test College",
                "programName": "Software Engineering",
                "courseName": "Introduction to Programming",
                "branchName": "Computer Science",
                "eligibility": "Passed 12th grade"
            }
        }
    }))
}

fn application_view(backend: &std::sync::Arc<FakeBackend>) -> StudentApplicationView {
    StudentApplicationView::new("123", backend.clone(), backend.clone())
}

#[tokio::test]
async fn application_detail_pending_shows_wait_note() {
    let backend = FakeBackend::new();
    {
        let mut state = backend.state();
        state.application_by_id.insert("123".into(), full_application("Pending"));
        state
            .admission_by_application
            .insert("123".into(), from_json(json!({ "admissionStatus": "Pending" })));
    }

    let mut view = application_view(&backend);
    view.load().await;
    let page = view.render();

    assert!(page.has_text("Applicant Details"));
    assert!(page.has_text("John Doe"));
    assert!(page.has_text("Computer Science"));
    assert!(page.mentions("Please wait until your application gets accepted"));
    assert!(page.button_labeled("Make Payment", 0).is_none());
    assert_eq!(backend.count("application_by_id"), 1);
    assert_eq!(backend.count("admission_by_application"), 1);
}

#[tokio::test]
async fn application_detail_rejected_shows_rejection() {
    let backend = FakeBackend::new();
    backend
        .state()
        .application_by_id
        .insert("123".into(), full_application("Rejected"));

    let mut view = application_view(&backend);
    view.load().await;
    let page = view.render();

    assert!(page.has_text("John Doe"));
    assert!(page.mentions("Unfortunately, your application has not been accepted"));
}

#[tokio::test]
async fn application_detail_without_record_prompts_to_apply() {
    let backend = FakeBackend::new();
    {
        let mut state = backend.state();
        state.application_by_id.insert("123".into(), from_json(json!({})));
        state.admission_by_application.insert("123".into(), from_json(json!({})));
    }

    let mut view = application_view(&backend);
    view.load().await;
    assert_eq!(view.state(), &Loadable::Empty);

    let page = view.render();
    assert!(page.has_text("\"No Applications Found\""));
    assert!(page.has_text("Please Apply To Program"));
    assert!(!page.has_text("Applicant Details"));

    let history = History::new();
    view.press("Apply", 0, &history).await.unwrap();
    assert_eq!(history.last(), Some(Route::ProgramScheduleApply));
}

#[tokio::test]
async fn application_detail_missing_schedule_renders_not_found_block() {
    let backend = FakeBackend::new();
    backend.state().application_by_id.insert(
        "123".into(),
        from_json(json!({ "applicationId": "123", "applicantFullName": "Jo", "applicationStatus": "Pending", "schedule": {} })),
    );

    let mut view = application_view(&backend);
    view.load().await;
    let page = view.render();
    assert!(page.has_text("Program details not found"));
}

#[tokio::test]
async fn accepted_application_without_admission_offers_payment() {
    let backend = FakeBackend::new();
    backend
        .state()
        .application_by_id
        .insert("123".into(), full_application("Accepted"));

    let mut view = application_view(&backend);
    view.load().await;

    let history = History::new();
    view.press("Make Payment", 0, &history).await.unwrap();
    assert_eq!(
        history.last().map(|r| r.path()),
        Some("/application/123/payment".to_string())
    );
}

#[tokio::test]
async fn accepted_application_with_admission_shows_confirmation() {
    let backend = FakeBackend::new();
    {
        let mut state = backend.state();
        state
            .application_by_id
            .insert("123".into(), full_application("Accepted"));
        state.admission_by_application.insert(
            "123".into(),
            from_json(json!({
                "admissionStatus": "Accepted",
                "college": { "collegeName": "Test College" },
                "program": { "programName": "Test Program" },
                "course": { "courseName": "Test Course" },
                "year": 2024
            })),
        );
    }

    let mut view = application_view(&backend);
    view.load().await;
    let page = view.render();

    assert!(page.has_text("Admission confirmed successfully!"));
    assert!(page.has_text("Test Program"));
    assert!(page.has_text("2024"));
    assert!(page.button_labeled("Make Payment", 0).is_none());

    let history = History::new();
    view.press("DashBoard", 0, &history).await.unwrap();
    assert_eq!(history.last(), Some(Route::Dashboard));
}

#[tokio::test]
async fn accepted_application_with_pending_admission_hides_payment() {
    let backend = FakeBackend::new();
    {
        let mut state = backend.state();
        state
            .application_by_id
            .insert("123".into(), full_application("Accepted"));
        state.admission_by_application.insert(
            "123".into(),
            from_json(json!({
                "admissionStatus": "Pending",
                "college": { "collegeName": "Test College" },
                "year": 2024
            })),
        );
    }

    let mut view = application_view(&backend);
    view.load().await;
    let page = view.render();

    assert!(page.button_labeled("Make Payment", 0).is_none());
    assert!(page.has_text("Admission Details"));
    assert!(page.has_text("Pending"));
    assert!(!page.has_text("Admission confirmed successfully!"));
    assert!(page.button_labeled("DashBoard", 0).is_some());
}

#[tokio::test]
async fn application_detail_failure_is_visible_and_retryable() {
    let backend = FakeBackend::new();
    backend
        .state()
        .application_by_id
        .insert("123".into(), full_application("Pending"));
    backend.fail_next("application_by_id", 1);

    let mut view = application_view(&backend);
    view.load().await;
    assert!(matches!(view.state(), Loadable::Failed(_)));
    let page = view.render();
    assert!(page.mentions("HTTP 500"));

    let history = History::new();
    view.press("Retry", 0, &history).await.unwrap();
    assert!(view.render().has_text("Applicant Details"));
    assert_eq!(backend.count("application_by_id"), 2);
    assert!(history.routes().is_empty());
}

#[tokio::test]
async fn admission_outcome_accepted_lists_details() {
    let backend = FakeBackend::new();
    {
        let mut state = backend.state();
        state.admission_by_application.insert(
            "123".into(),
            from_json(json!({
                "admissionStatus": "Accepted",
                "emailId": "test@example.com",
                "college": { "collegeName": "Test College" },
                "program": { "programName": "Test Program" },
                "course": { "courseName": "Test Course" },
                "year": 2024
            })),
        );
        state
            .application_by_id
            .insert("123".into(), from_json(json!({ "applicationId": "456" })));
    }

    let mut view = StudentAdmissionView::new("123", backend.clone(), backend.clone());
    view.load().await;
    let page = view.render();

    assert!(page.has_text("Admission confirmed successfully!"));
    for text in ["test@example.com", "Test College", "Test Program", "Test Course", "2024"] {
        assert!(page.has_text(text), "missing {text}");
    }

    let history = History::new();
    view.press("DashBoard", 0, &history).await.unwrap();
    assert_eq!(history.last(), Some(Route::Dashboard));
}

#[tokio::test]
async fn admission_outcome_pending_offers_payment() {
    let backend = FakeBackend::new();
    {
        let mut state = backend.state();
        state
            .admission_by_application
            .insert("123".into(), from_json(json!({ "admissionStatus": "Pending" })));
        state
            .application_by_id
            .insert("123".into(), from_json(json!({ "applicationId": "456" })));
    }

    let mut view = StudentAdmissionView::new("123", backend.clone(), backend.clone());
    view.load().await;
    assert!(view.render().mentions("no payment found"));

    let history = History::new();
    view.press("Make Payment", 0, &history).await.unwrap();
    assert_eq!(history.last().unwrap().path(), "/application/123/payment");
}

#[tokio::test]
async fn admission_outcome_without_application() {
    let backend = FakeBackend::new();
    let mut view = StudentAdmissionView::new("123", backend.clone(), backend.clone());
    view.load().await;

    let page = view.render();
    assert!(page.headings().iter().any(|h| h.contains("No Application Found")));
    assert!(page.button_labeled("Make Payment", 0).is_none());
}

fn two_applications() -> Vec<Application> {
    from_json(json!([
        { "applicationId": "123", "applicantFullName": "John Doe", "applicationStatus": "Accepted" },
        { "applicationId": "124", "applicantFullName": "Jane Doe", "applicationStatus": "Pending" }
    ]))
}

#[tokio::test]
async fn application_list_renders_one_row_per_application() {
    let backend = FakeBackend::new();
    backend
        .state()
        .applications_by_email
        .insert("test@example.com".into(), two_applications());

    let mut view = StudentApplicationsView::new("test@example.com", backend.clone());
    view.load().await;
    let page = view.render();

    assert!(page.has_text("List of Applications"));
    for text in ["123", "John Doe", "Accepted", "124", "Jane Doe", "Pending"] {
        assert!(page.has_text(text), "missing {text}");
    }
    assert_eq!(page.tables()[0].rows.len(), 2);
    assert_eq!(backend.calls(), vec!["applications_by_email(test@example.com)"]);
}

#[tokio::test]
async fn application_list_view_button_navigates_to_detail() {
    let backend = FakeBackend::new();
    backend
        .state()
        .applications_by_email
        .insert("test@example.com".into(), two_applications());

    let mut view = StudentApplicationsView::new("test@example.com", backend.clone());
    view.load().await;

    let history = History::new();
    view.press("View", 0, &history).await.unwrap();
    view.press("View", 1, &history).await.unwrap();
    assert_eq!(
        history.routes(),
        vec![
            Route::Application { application_id: "123".into() },
            Route::Application { application_id: "124".into() },
        ]
    );
}

#[tokio::test]
async fn application_list_empty_prompts_to_apply() {
    let backend = FakeBackend::new();
    let mut view = StudentApplicationsView::new("test@example.com", backend.clone());
    view.load().await;
    let page = view.render();

    assert!(page.has_text("No Application Found"));
    assert!(page.has_text("Apply here to start your journey! Admissions are now open."));
    assert!(page.tables().is_empty());

    let history = History::new();
    view.press("Apply here", 0, &history).await.unwrap();
    assert_eq!(history.last().unwrap().path(), "/program-schedule-apply");
}

#[tokio::test]
async fn application_list_filters_by_status() {
    let backend = FakeBackend::new();
    backend
        .state()
        .applications_by_email
        .insert("test@example.com".into(), two_applications());

    let mut view = StudentApplicationsView::new("test@example.com", backend.clone());
    view.load().await;

    let history = History::new();
    view.handle(Action::FilterStatus(Some(DecisionStatus::Pending)), &history)
        .await;
    let page = view.render();
    assert_eq!(page.tables()[0].rows.len(), 1);
    assert!(page.has_text("Jane Doe"));
    assert!(!page.has_text("John Doe"));

    view.handle(Action::FilterStatus(Some(DecisionStatus::Rejected)), &history)
        .await;
    let page = view.render();
    assert!(page.tables().is_empty());
    assert!(page.mentions("No applications match"));

    // Filtering never goes back to the backend.
    assert_eq!(backend.count("applications_by_email"), 1);
}

#[tokio::test]
async fn application_list_filter_ignores_case_of_unknown_status() {
    let backend = FakeBackend::new();
    backend.state().applications_by_email.insert(
        "test@example.com".into(),
        from_json(json!([
            { "applicationId": "125", "applicantFullName": "Sam Roe", "applicationStatus": "Waitlisted" },
            { "applicationId": "124", "applicantFullName": "Jane Doe", "applicationStatus": "Pending" }
        ])),
    );

    let mut view = StudentApplicationsView::new("test@example.com", backend.clone());
    view.load().await;

    let history = History::new();
    let typed = DecisionStatus::from("waitlisted".to_string());
    view.handle(Action::FilterStatus(Some(typed)), &history).await;
    let page = view.render();
    assert_eq!(page.tables()[0].rows.len(), 1);
    assert!(page.has_text("Sam Roe"));

    let applied = page.elements.iter().find_map(|e| match e {
        Element::Select { options, selected, .. } => options.get(*selected).cloned(),
        _ => None,
    });
    assert_eq!(applied.as_deref(), Some("waitlisted"));
}

#[tokio::test]
async fn payment_form_rejects_non_positive_amount() {
    let backend = FakeBackend::new();
    backend
        .state()
        .application_by_id
        .insert("123".into(), full_application("Accepted"));

    let mut view = MakePaymentView::new("123", backend.clone(), backend.clone());
    view.load().await;

    let history = History::new();
    view.handle(Action::SubmitPayment { amount: 0.0 }, &history).await;
    assert_eq!(view.notice(), Some("Payment amount must be greater than zero"));
    assert!(view.render().has_text("Payment amount must be greater than zero"));
    assert_eq!(backend.count("make_payment"), 0);
    assert!(history.routes().is_empty());
}

#[tokio::test]
async fn payment_form_records_payment_and_returns_to_application() {
    let backend = FakeBackend::new();
    backend
        .state()
        .application_by_id
        .insert("123".into(), full_application("Accepted"));

    let mut view = MakePaymentView::new("123", backend.clone(), backend.clone());
    view.load().await;
    assert!(view.render().has_text("Payment Details"));

    let history = History::new();
    view.handle(Action::SubmitPayment { amount: 2500.0 }, &history)
        .await;

    let created = backend.state().created_payments.clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].application_id, "123");
    assert_eq!(created[0].payment_amount, 2500.0);
    assert_eq!(created[0].payment_status, PaymentStatus::Paid);
    assert_eq!(created[0].email_id, "johndoe@example.com");
    assert_eq!(
        history.last(),
        Some(Route::Application { application_id: "123".into() })
    );
    assert_eq!(view.notice(), None);
}

#[tokio::test]
async fn payment_form_requires_accepted_application() {
    let backend = FakeBackend::new();
    backend
        .state()
        .application_by_id
        .insert("123".into(), full_application("Pending"));

    let mut view = MakePaymentView::new("123", backend.clone(), backend.clone());
    view.load().await;
    assert!(view.render().mentions("Payment opens once your application has been accepted"));

    let history = History::new();
    view.handle(Action::SubmitPayment { amount: 100.0 }, &history).await;
    assert_eq!(backend.count("make_payment"), 0);
    assert!(view.notice().is_some());
}

#[tokio::test]
async fn payment_form_surfaces_backend_failure() {
    let backend = FakeBackend::new();
    backend
        .state()
        .application_by_id
        .insert("123".into(), full_application("Accepted"));
    backend.fail_next("make_payment", 1);

    let mut view = MakePaymentView::new("123", backend.clone(), backend.clone());
    view.load().await;

    let history = History::new();
    view.handle(Action::SubmitPayment { amount: 100.0 }, &history).await;
    assert!(view.notice().unwrap().starts_with("Payment could not be recorded"));
    assert!(history.routes().is_empty());
}
