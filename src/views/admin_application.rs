use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::student_application::{render_applicant, ApplicationDetail};
use super::{render_pending, Loadable, View};
use crate::models::Admission;
use crate::routes::{Navigator, Route};
use crate::services::{AdmissionService, ApplicationService};
use crate::ui::{Action, Button, ButtonStyle, Page};

/// Read-only review of one application for administrators
/// (`/admin/application/{id}`), reached from the admission panel.
pub struct AdminApplicationView {
    application_id: String,
    applications: Arc<dyn ApplicationService>,
    admissions: Arc<dyn AdmissionService>,
    state: Loadable<ApplicationDetail>,
}

impl AdminApplicationView {
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
}

#[async_trait]
impl View for AdminApplicationView {
    async fn load(&mut self) {
        self.state = Loadable::Loading;
        let id = self.application_id.as_str();
        let result = tokio::try_join!(
            self.applications.application_by_id(id),
            self.admissions.admission_by_application(id),
        );
        info!(application_id = %id, ok = result.is_ok(), "loaded application review");

        let result = result.map(|(application, admission)| ApplicationDetail {
            application: application.unwrap_or_default(),
            admission: admission.filter(Admission::is_present),
        });
        self.state = Loadable::settle(result, |d| !d.application.is_present());
    }

    fn render(&self) -> Page {
        let mut page = Page::new(format!("Review application {}", self.application_id));
        let back = Button::navigate("Back", ButtonStyle::Secondary, Route::AdmissionPanel);
        if render_pending(&self.state, &mut page) {
            return page;
        }

        let Some(detail) = self.state.loaded() else {
            page.heading("Applicant Details");
            page.text("No Application Found");
            page.button(back);
            return page;
        };

        render_applicant(&mut page, &detail.application);
        page.heading("Admission Decision");
        match &detail.admission {
            Some(admission) => {
                let status = admission.admission_status.as_ref().map(ToString::to_string);
                page.field("Admission Status", status.as_deref())
                    .field("College", admission.college_name())
                    .field("Program", admission.program_name())
                    .field("Course", admission.course_name())
                    .field("Year", admission.year.as_deref());
            }
            None => {
                page.text("No admission recorded yet");
            }
        }
        page.button(back);
        page
    }

    async fn handle(&mut self, action: Action, nav: &dyn Navigator) {
        match action {
            Action::Navigate(route) => nav.navigate(route),
            Action::Retry => self.load().await,
            other => tracing::debug!(?other, "ignored by application review"),
        }
    }
}
