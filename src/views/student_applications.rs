use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{or_dash, render_pending, Loadable, View};
use crate::models::{Application, DecisionStatus};
use crate::routes::{Navigator, Route};
use crate::services::ApplicationService;
use crate::ui::{Action, Button, ButtonStyle, Element, Page, Table};

const STATUS_OPTIONS: [&str; 4] = ["All", "Pending", "Accepted", "Rejected"];

/// All applications submitted under one email (`/applications/{emailId}`).
pub struct StudentApplicationsView {
    email_id: String,
    applications: Arc<dyn ApplicationService>,
    state: Loadable<Vec<Application>>,
    status_filter: Option<DecisionStatus>,
}

impl StudentApplicationsView {
    pub fn new(email_id: impl Into<String>, applications: Arc<dyn ApplicationService>) -> Self {
        Self {
            email_id: email_id.into(),
            applications,
            state: Loadable::Idle,
            status_filter: None,
        }
    }

    pub fn state(&self) -> &Loadable<Vec<Application>> {
        &self.state
    }

    pub fn status_filter(&self) -> Option<&DecisionStatus> {
        self.status_filter.as_ref()
    }

    fn visible<'a>(&'a self, all: &'a [Application]) -> impl Iterator<Item = &'a Application> {
        all.iter().filter(move |app| match &self.status_filter {
            None => true,
            Some(wanted) => app.application_status.as_ref() == Some(wanted),
        })
    }
}

#[async_trait]
impl View for StudentApplicationsView {
    async fn load(&mut self) {
        self.state = Loadable::Loading;
        let result = self.applications.applications_by_email(&self.email_id).await;
        if let Ok(apps) = &result {
            info!(email = %self.email_id, count = apps.len(), "loaded applications");
        }
        self.state = Loadable::settle(result, Vec::is_empty);
    }

    fn render(&self) -> Page {
        let mut page = Page::new("My Applications");
        if render_pending(&self.state, &mut page) {
            return page;
        }

        let Some(apps) = self.state.loaded() else {
            page.heading("No Application Found");
            page.text("Apply here to start your journey! Admissions are now open.");
            page.button(Button::navigate(
                "Apply here",
                ButtonStyle::Primary,
                Route::ProgramScheduleApply,
            ));
            return page;
        };

        page.heading("List of Applications");
        let mut options: Vec<String> = STATUS_OPTIONS.iter().map(|s| s.to_string()).collect();
        let selected = match &self.status_filter {
            None => 0,
            Some(status) => {
                let wanted = status.to_string();
                match options.iter().position(|o| o.eq_ignore_ascii_case(&wanted)) {
                    Some(i) => i,
                    // A status outside the fixed list still shows as applied.
                    None => {
                        options.push(wanted);
                        options.len() - 1
                    }
                }
            }
        };
        page.push(Element::Select {
            label: "Filter by status".to_string(),
            options,
            selected,
        });

        let mut table = Table::new(["Application Id", "Applicant Name", "Status"]);
        for app in self.visible(apps) {
            let actions = match &app.application_id {
                Some(id) => vec![Button::navigate(
                    "View",
                    ButtonStyle::Info,
                    Route::Application {
                        application_id: id.clone(),
                    },
                )],
                None => Vec::new(),
            };
            let status = app.application_status.as_ref().map(ToString::to_string);
            table.row(
                vec![
                    or_dash(app.application_id.as_deref()),
                    or_dash(app.applicant_full_name.as_deref()),
                    or_dash(status.as_deref()),
                ],
                actions,
            );
        }

        if table.rows.is_empty() {
            page.text("No applications match the selected status.");
        } else {
            page.push(Element::Table(table));
        }
        page
    }

    async fn handle(&mut self, action: Action, nav: &dyn Navigator) {
        match action {
            Action::Navigate(route) => nav.navigate(route),
            Action::Retry => self.load().await,
            Action::FilterStatus(status) => self.status_filter = status,
            other => tracing::debug!(?other, "ignored by application list"),
        }
    }
}
