use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{render_pending, Loadable, View};
use crate::models::{Admission, Application, DecisionStatus};
use crate::routes::{Navigator, Route};
use crate::services::{AdmissionService, ApplicationService};
use crate::ui::{Action, Button, ButtonStyle, Page};

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDetail {
    pub application: Application,
    /// Only kept when the backend returned a real record.
    pub admission: Option<Admission>,
}

/// Detail page for one of a student's applications (`/application/{id}`).
pub struct StudentApplicationView {
    application_id: String,
    applications: Arc<dyn ApplicationService>,
    admissions: Arc<dyn AdmissionService>,
    state: Loadable<ApplicationDetail>,
}

impl StudentApplicationView {
    pub fn new(
        application_id: impl Into<String>,
        applications: Arc<dyn ApplicationService>,
        admissions: Arc<dyn AdmissionService>,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            applications,
            admissions,
            state: Loadable::Idle,
        }
    }

    pub fn state(&self) -> &Loadable<ApplicationDetail> {
        &self.state
    }

    fn render_decision(&self, page: &mut Page, detail: &ApplicationDetail) {
        match &detail.application.application_status {
            // Any admission record means the fee step is over.
            Some(DecisionStatus::Accepted) => match &detail.admission {
                Some(admission) => {
                    if admission.is_accepted() {
                        page.heading("Admission confirmed successfully!");
                    } else {
                        let status = admission.admission_status.as_ref().map(ToString::to_string);
                        page.heading("Admission Details");
                        page.field("Admission Status", status.as_deref());
                    }
                    page.field("College", admission.college_name())
                        .field("Program", admission.program_name())
                        .field("Course", admission.course_name())
                        .field("Year", admission.year.as_deref());
                    page.button(Button::navigate("DashBoard", ButtonStyle::Secondary, Route::Dashboard));
                }
                _ => {
                    page.text("Congratulations! Your application has been accepted. Complete the payment to confirm your admission.");
                    page.button(Button::navigate(
                        "Make Payment",
                        ButtonStyle::Primary,
                        Route::ApplicationPayment {
                            application_id: self.application_id.clone(),
                        },
                    ));
                }
            },
            Some(DecisionStatus::Pending) => {
                page.text("Note: Please wait until your application gets accepted to proceed with the payment.");
            }
            _ => {
                page.text("Unfortunately, your application has not been accepted. Please apply to another program.");
            }
        }
    }
}

/// Applicant and program blocks, shared with the admin review page.
pub(super) fn render_applicant(page: &mut Page, app: &Application) {
    page.heading("Applicant Details");
    page.field("Application Id", app.application_id.as_deref())
        .field("Full Name", app.applicant_full_name.as_deref())
        .field("Date of Birth", app.date_of_birth.as_deref())
        .field("Highest Qualification", app.highest_qualification.as_deref())
        .field("Final Year Percentage", app.final_year_percentage.as_deref())
        .field("Goals", app.goals.as_deref())
        .field("Email", app.email_id.as_deref())
        .field("Date of Interview", app.date_of_interview.as_deref());
    let status = app.application_status.as_ref().map(ToString::to_string);
    page.field("Application Status", status.as_deref());

    page.heading("Program Details");
    match (&app.schedule, app.program()) {
        (Some(schedule), Some(program)) => {
            page.field("University", program.name.as_deref())
                .field("College", program.college_name.as_deref())
                .field("Program", program.program_name.as_deref())
                .field("Course", program.course_name.as_deref())
                .field("Branch", program.branch_name.as_deref())
                .field("Eligibility", program.eligibility.as_deref())
                .field("Start Date", schedule.start_date.as_deref())
                .field("End Date", schedule.end_date.as_deref());
        }
        _ => {
            page.text("Program details not found");
        }
    }
}

#[async_trait]
impl View for StudentApplicationView {
    async fn load(&mut self) {
        self.state = Loadable::Loading;
        let id = self.application_id.as_str();
        let result = tokio::try_join!(
            self.applications.application_by_id(id),
            self.admissions.admission_by_application(id),
        );
        info!(application_id = %id, ok = result.is_ok(), "loaded application detail");

        let result = result.map(|(application, admission)| ApplicationDetail {
            application: application.unwrap_or_default(),
            admission: admission.filter(Admission::is_present),
        });
        self.state = Loadable::settle(result, |d| !d.application.is_present());
    }

    fn render(&self) -> Page {
        let mut page = Page::new(format!("Application {}", self.application_id));
        if render_pending(&self.state, &mut page) {
            return page;
        }

        match self.state.loaded() {
            None => {
                page.heading("\"No Applications Found\"");
                page.text("Please Apply To Program");
                page.button(Button::navigate("Apply", ButtonStyle::Primary, Route::ProgramScheduleApply));
            }
            Some(detail) => {
                render_applicant(&mut page, &detail.application);
                self.render_decision(&mut page, detail);
            }
        }
        page
    }

    async fn handle(&mut self, action: Action, nav: &dyn Navigator) {
        match action {
            Action::Navigate(route) => nav.navigate(route),
            Action::Retry => self.load().await,
            other => tracing::debug!(?other, "ignored by application detail"),
        }
    }
}
