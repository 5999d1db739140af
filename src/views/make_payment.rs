use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use tracing::{info, warn};

use super::{render_pending, Loadable, View};
use crate::error::{PortalError, Result};
use crate::models::{Application, DecisionStatus, NewPayment, PaymentStatus};
use crate::routes::{Navigator, Route};
use crate::services::{ApplicationService, PaymentService};
use crate::ui::{Action, Button, ButtonStyle, Page};

/// Fee payment for an accepted application (`/application/{id}/payment`).
pub struct MakePaymentView {
    application_id: String,
    applications: Arc<dyn ApplicationService>,
    payments: Arc<dyn PaymentService>,
    state: Loadable<Application>,
    notice: Option<String>,
}

impl MakePaymentView {
    pub fn new(
        application_id: impl Into<String>,
        applications: Arc<dyn ApplicationService>,
        payments: Arc<dyn PaymentService>,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            applications,
            payments,
            state: Loadable::Idle,
            notice: None,
        }
    }

    pub fn state(&self) -> &Loadable<Application> {
        &self.state
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Required-field checks before anything is sent.
    fn build_payment(&self, amount: f64) -> Result<NewPayment> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PortalError::Validation(
                "Payment amount must be greater than zero".to_string(),
            ));
        }
        let app = self.state.loaded().ok_or_else(|| {
            PortalError::Validation("Application details are not loaded".to_string())
        })?;
        if app.application_status != Some(DecisionStatus::Accepted) {
            return Err(PortalError::Validation(
                "Payment opens once the application is accepted".to_string(),
            ));
        }
        let email_id = app.email_id.clone().ok_or_else(|| {
            PortalError::Validation("Application has no email address on record".to_string())
        })?;

        Ok(NewPayment {
            application_id: self.application_id.clone(),
            payment_amount: amount,
            payment_status: PaymentStatus::Paid,
            payment_date: Local::now().date_naive(),
            email_id,
        })
    }

    async fn submit(&mut self, amount: f64, nav: &dyn Navigator) {
        let payment = match self.build_payment(amount) {
            Ok(payment) => payment,
            Err(err) => {
                self.notice = Some(err.to_string());
                return;
            }
        };

        match self.payments.make_payment(&payment).await {
            Ok(created) => {
                info!(
                    application_id = %self.application_id,
                    payment_id = created.payment_id.as_deref().unwrap_or("-"),
                    "payment recorded"
                );
                self.notice = None;
                nav.navigate(Route::Application {
                    application_id: self.application_id.clone(),
                });
            }
            Err(err) => {
                warn!(application_id = %self.application_id, error = %err, "payment failed");
                self.notice = Some(format!("Payment could not be recorded: {err}"));
            }
        }
    }
}

#[async_trait]
impl View for MakePaymentView {
    async fn load(&mut self) {
        self.state = Loadable::Loading;
        let result = self
            .applications
            .application_by_id(&self.application_id)
            .await
            .map(Option::unwrap_or_default);
        self.state = Loadable::settle(result, |a| !a.is_present());
    }

    fn render(&self) -> Page {
        let mut page = Page::new("Payment");
        if let Some(notice) = &self.notice {
            page.notice(notice.clone());
        }
        if render_pending(&self.state, &mut page) {
            return page;
        }

        let Some(app) = self.state.loaded() else {
            page.heading("No Application Found");
            page.button(Button::navigate("Apply", ButtonStyle::Primary, Route::ProgramScheduleApply));
            return page;
        };

        page.heading("Payment Details");
        page.field("Application Id", Some(self.application_id.as_str()))
            .field("Applicant", app.applicant_full_name.as_deref())
            .field("Email", app.email_id.as_deref());
        if let Some(program) = app.program() {
            page.field("College", program.college_name.as_deref())
                .field("Program", program.program_name.as_deref())
                .field("Course", program.course_name.as_deref());
        }

        if app.application_status == Some(DecisionStatus::Accepted) {
            page.text("Enter the fee amount to complete your admission.");
        } else {
            page.text("Payment opens once your application has been accepted.");
        }
        page.button(Button::navigate(
            "Back",
            ButtonStyle::Secondary,
            Route::Application {
                application_id: self.application_id.clone(),
            },
        ));
        page
    }

    async fn handle(&mut self, action: Action, nav: &dyn Navigator) {
        match action {
            Action::Navigate(route) => nav.navigate(route),
            Action::Retry => self.load().await,
            Action::SubmitPayment { amount } => self.submit(amount, nav).await,
            other => tracing::debug!(?other, "ignored by payment form"),
        }
    }
}
