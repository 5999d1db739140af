use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{render_pending, Loadable, View};
use crate::models::{Admission, Application};
use crate::routes::{Navigator, Route};
use crate::services::{AdmissionService, ApplicationService};
use crate::ui::{Action, Button, ButtonStyle, Page};

#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionOutcome {
    pub application: Application,
    pub admission: Option<Admission>,
}

/// Admission outcome for one application (`/application/{id}/admission`).
pub struct StudentAdmissionView {
    application_id: String,
    admissions: Arc<dyn AdmissionService>,
    applications: Arc<dyn ApplicationService>,
    state: Loadable<AdmissionOutcome>,
}

impl StudentAdmissionView {
    pub fn new(
        application_id: impl Into<String>,
        admissions: Arc<dyn AdmissionService>,
        applications: Arc<dyn ApplicationService>,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            admissions,
            applications,
            state: Loadable::Idle,
        }
    }

    pub fn state(&self) -> &Loadable<AdmissionOutcome> {
        &self.state
    }
}

#[async_trait]
impl View for StudentAdmissionView {
    async fn load(&mut self) {
        self.state = Loadable::Loading;
        let id = self.application_id.as_str();
        let result = tokio::try_join!(
            self.admissions.admission_by_application(id),
            self.applications.application_by_id(id),
        );
        info!(application_id = %id, ok = result.is_ok(), "loaded admission outcome");

        let result = result.map(|(admission, application)| AdmissionOutcome {
            application: application.unwrap_or_default(),
            admission: admission.filter(Admission::is_present),
        });
        self.state = Loadable::settle(result, |o| !o.application.is_present());
    }

    fn render(&self) -> Page {
        let mut page = Page::new("Admission");
        if render_pending(&self.state, &mut page) {
            return page;
        }

        let Some(outcome) = self.state.loaded() else {
            page.heading("No Application Found");
            page.text("Submit an application to see your admission status here.");
            return page;
        };

        match &outcome.admission {
            Some(admission) if admission.is_accepted() => {
                page.heading("Admission confirmed successfully!");
                page.field("Email", admission.email_id.as_deref())
                    .field("College", admission.college_name())
                    .field("Program", admission.program_name())
                    .field("Course", admission.course_name())
                    .field("Year", admission.year.as_deref());
                page.button(Button::navigate("DashBoard", ButtonStyle::Secondary, Route::Dashboard));
            }
            _ => {
                page.heading("No Payment Found");
                page.text("Your admission is confirmed once the fee has been paid.");
                page.button(Button::navigate(
                    "Make Payment",
                    ButtonStyle::Primary,
                    Route::ApplicationPayment {
                        application_id: self.application_id.clone(),
                    },
                ));
            }
        }
        page
    }

    async fn handle(&mut self, action: Action, nav: &dyn Navigator) {
        match action {
            Action::Navigate(route) => nav.navigate(route),
            Action::Retry => self.load().await,
            other => tracing::debug!(?other, "ignored by admission outcome"),
        }
    }
}
