use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{or_dash, render_pending, Loadable, View};
use crate::models::{Admission, College};
use crate::routes::{Navigator, Route};
use crate::services::AdmissionService;
use crate::ui::{Action, Button, ButtonStyle, Element, Page, Table};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdmissionListing {
    pub admissions: Vec<Admission>,
    pub colleges: Vec<College>,
}

/// Admin table of every admission, filterable by college.
pub struct AdmissionPanelView {
    admissions: Arc<dyn AdmissionService>,
    state: Loadable<AdmissionListing>,
    college_filter: Option<String>,
}

impl AdmissionPanelView {
    pub fn new(admissions: Arc<dyn AdmissionService>) -> Self {
        Self {
            admissions,
            state: Loadable::Idle,
            college_filter: None,
        }
    }

    pub fn state(&self) -> &Loadable<AdmissionListing> {
        &self.state
    }

    pub fn college_filter(&self) -> Option<&str> {
        self.college_filter.as_deref()
    }

    fn college_options(&self) -> Vec<String> {
        let mut options = vec!["All Colleges".to_string()];
        if let Some(listing) = self.state.loaded() {
            options.extend(
                listing
                    .colleges
                    .iter()
                    .filter_map(|c| c.college_name.clone()),
            );
        }
        options
    }

    fn render_table(&self, page: &mut Page, listing: &AdmissionListing) {
        let mut table = Table::new([
            "Email", "Application Id", "Applicant", "Status", "College", "Program", "Year",
        ]);
        let rows = listing.admissions.iter().filter(|a| match &self.college_filter {
            None => true,
            Some(name) => a.college_name() == Some(name.as_str()),
        });

        for admission in rows {
            let mut actions = Vec::new();
            if let Some(id) = admission.application_id() {
                actions.push(Button::navigate(
                    "View",
                    ButtonStyle::Info,
                    Route::AdminApplication {
                        application_id: id.to_string(),
                    },
                ));
                actions.push(Button::new(
                    "Delete",
                    ButtonStyle::Danger,
                    Action::DeleteAdmission {
                        application_id: id.to_string(),
                    },
                ));
            }

            let applicant = admission
                .application
                .as_ref()
                .and_then(|a| a.applicant_full_name.as_deref());
            let status = admission.admission_status.as_ref().map(ToString::to_string);
            table.row(
                vec![
                    or_dash(admission.email_id.as_deref()),
                    or_dash(admission.application_id()),
                    or_dash(applicant),
                    or_dash(status.as_deref()),
                    or_dash(admission.college_name()),
                    or_dash(admission.program_name()),
                    or_dash(admission.year.as_deref()),
                ],
                actions,
            );
        }

        if table.rows.is_empty() {
            page.text("No admissions for the selected college.");
        } else {
            page.push(Element::Table(table));
        }
    }
}

#[async_trait]
impl View for AdmissionPanelView {
    async fn load(&mut self) {
        self.state = Loadable::Loading;
        let result = tokio::try_join!(self.admissions.all_admissions(), self.admissions.all_colleges())
            .map(|(admissions, colleges)| AdmissionListing { admissions, colleges });
        if let Ok(listing) = &result {
            info!(
                admissions = listing.admissions.len(),
                colleges = listing.colleges.len(),
                "loaded admission panel"
            );
        }
        self.state = Loadable::settle(result, |l| l.admissions.is_empty());
    }

    fn render(&self) -> Page {
        let mut page = Page::new("Admissions");
        page.heading("ADMISSION PANEL");
        if render_pending(&self.state, &mut page) {
            return page;
        }

        let mut options = self.college_options();
        let selected = match &self.college_filter {
            None => 0,
            Some(name) => match options.iter().position(|o| o == name) {
                Some(i) => i,
                // Keep an unknown college visible as the applied filter.
                None => {
                    options.push(name.clone());
                    options.len() - 1
                }
            },
        };
        page.push(Element::Select {
            label: "Filter by college".to_string(),
            options,
            selected,
        });

        match self.state.loaded() {
            None => {
                page.text("No Admission Found");
            }
            Some(listing) => self.render_table(&mut page, listing),
        }
        page
    }

    async fn handle(&mut self, action: Action, nav: &dyn Navigator) {
        match action {
            Action::Navigate(route) => nav.navigate(route),
            Action::Retry => self.load().await,
            Action::FilterCollege(college) => self.college_filter = college,
            Action::DeleteAdmission { application_id } => {
                match self.admissions.delete_admission(&application_id).await {
                    Ok(()) => info!(%application_id, "deleted admission"),
                    Err(err) => {
                        warn!(%application_id, error = %err, "delete admission failed");
                        self.state = Loadable::Failed(err.to_string());
                        return;
                    }
                }
                // Refresh only after the delete has settled.
                self.load().await;
            }
            other => tracing::debug!(?other, "ignored by admission panel"),
        }
    }
}
