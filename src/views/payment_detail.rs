use std::sync::Arc;

use async_trait::async_trait;

use super::{render_pending, Loadable, View};
use crate::models::Payment;
use crate::routes::{Navigator, Route};
use crate::services::PaymentService;
use crate::ui::{Action, Button, ButtonStyle, Page};

/// One payment record (`/payment/applicationId/{id}`).
pub struct PaymentDetailView {
    payment_id: String,
    payments: Arc<dyn PaymentService>,
    state: Loadable<Payment>,
}

impl PaymentDetailView {
    pub fn new(payment_id: impl Into<String>, payments: Arc<dyn PaymentService>) -> Self {
        Self {
            payment_id: payment_id.into(),
            payments,
            state: Loadable::Idle,
        }
    }

    pub fn state(&self) -> &Loadable<Payment> {
        &self.state
    }
}

#[async_trait]
impl View for PaymentDetailView {
    async fn load(&mut self) {
        self.state = Loadable::Loading;
        let result = self
            .payments
            .payment_by_id(&self.payment_id)
            .await
            .map(Option::unwrap_or_default);
        self.state = Loadable::settle(result, |p| !p.is_present());
    }

    fn render(&self) -> Page {
        let mut page = Page::new(format!("Payment {}", self.payment_id));
        if render_pending(&self.state, &mut page) {
            return page;
        }

        match self.state.loaded() {
            None => {
                page.heading("No Payment Found");
            }
            Some(payment) => {
                let app = payment.application.as_ref();
                let amount = payment.payment_amount.map(|a| a.to_string());
                let status = payment.payment_status.as_ref().map(ToString::to_string);
                page.heading("Payment Details");
                page.field("Payment Id", payment.payment_id.as_deref())
                    .field("Application Id", app.and_then(|a| a.application_id.as_deref()))
                    .field("Applicant", payment.applicant_name())
                    .field("Amount", amount.as_deref())
                    .field("Status", status.as_deref())
                    .field("Date", payment.payment_date.as_deref())
                    .field("Email", payment.email_id.as_deref());
            }
        }
        page.button(Button::navigate("Back", ButtonStyle::Secondary, Route::PaymentPanel));
        page
    }

    async fn handle(&mut self, action: Action, nav: &dyn Navigator) {
        match action {
            Action::Navigate(route) => nav.navigate(route),
            Action::Retry => self.load().await,
            other => tracing::debug!(?other, "ignored by payment detail"),
        }
    }
}
