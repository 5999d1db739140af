use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{or_dash, render_pending, Loadable, View};
use crate::models::Payment;
use crate::routes::{Navigator, Route};
use crate::services::PaymentService;
use crate::ui::{Action, Button, ButtonStyle, Element, Page, Table};

/// Admin table of every payment record.
pub struct PaymentPanelView {
    payments: Arc<dyn PaymentService>,
    state: Loadable<Vec<Payment>>,
}

impl PaymentPanelView {
    pub fn new(payments: Arc<dyn PaymentService>) -> Self {
        Self {
            payments,
            state: Loadable::Idle,
        }
    }

    pub fn state(&self) -> &Loadable<Vec<Payment>> {
        &self.state
    }
}

#[async_trait]
impl View for PaymentPanelView {
    async fn load(&mut self) {
        self.state = Loadable::Loading;
        let result = self.payments.all_payments().await;
        if let Ok(payments) = &result {
            info!(count = payments.len(), "loaded payment panel");
        }
        self.state = Loadable::settle(result, Vec::is_empty);
    }

    fn render(&self) -> Page {
        let mut page = Page::new("Payments");
        if render_pending(&self.state, &mut page) {
            return page;
        }

        let Some(payments) = self.state.loaded() else {
            page.heading("No Payment Found");
            return page;
        };

        page.heading("List of payments");
        let mut table = Table::new(["Payment Id", "Applicant", "Amount", "Status", "Date", "Email"]);
        for payment in payments {
            let actions = match &payment.payment_id {
                Some(id) => vec![
                    Button::navigate(
                        "View",
                        ButtonStyle::Info,
                        Route::PaymentDetail {
                            payment_id: id.clone(),
                        },
                    ),
                    Button::new(
                        "Delete",
                        ButtonStyle::Danger,
                        Action::DeletePayment {
                            payment_id: id.clone(),
                        },
                    ),
                ],
                None => Vec::new(),
            };
            let amount = payment.payment_amount.map(|a| a.to_string());
            let status = payment.payment_status.as_ref().map(ToString::to_string);
            table.row(
                vec![
                    or_dash(payment.payment_id.as_deref()),
                    or_dash(payment.applicant_name()),
                    or_dash(amount.as_deref()),
                    or_dash(status.as_deref()),
                    or_dash(payment.payment_date.as_deref()),
                    or_dash(payment.email_id.as_deref()),
                ],
                actions,
            );
        }
        page.push(Element::Table(table));
        page
    }

    async fn handle(&mut self, action: Action, nav: &dyn Navigator) {
        match action {
            Action::Navigate(route) => nav.navigate(route),
            Action::Retry => self.load().await,
            Action::DeletePayment { payment_id } => {
                if let Err(err) = self.payments.delete_payment(&payment_id).await {
                    warn!(%payment_id, error = %err, "delete payment failed");
                    self.state = Loadable::Failed(err.to_string());
                    return;
                }
                info!(%payment_id, "deleted payment");
                self.load().await;
            }
            other => tracing::debug!(?other, "ignored by payment panel"),
        }
    }
}
