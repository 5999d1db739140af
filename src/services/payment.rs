use async_trait::async_trait;

use super::BackendClient;
use crate::error::Result;
use crate::models::{NewPayment, Payment};

/// Fee records. Payments are created only after an application is accepted.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// `GET /api/payment`
    async fn all_payments(&self) -> Result<Vec<Payment>>;

    /// `GET /api/payment/{paymentId}`
    async fn payment_by_id(&self, payment_id: &str) -> Result<Option<Payment>>;

    /// `DELETE /api/payment/{paymentId}`
    async fn delete_payment(&self, payment_id: &str) -> Result<()>;

    /// `POST /api/payment`
    async fn make_payment(&self, payment: &NewPayment) -> Result<Payment>;
}

#[async_trait]
impl PaymentService for BackendClient {
    async fn all_payments(&self) -> Result<Vec<Payment>> {
        self.get_list(&["api", "payment"]).await
    }

    async fn payment_by_id(&self, payment_id: &str) -> Result<Option<Payment>> {
        self.get_optional(&["api", "payment", payment_id]).await
    }

    async fn delete_payment(&self, payment_id: &str) -> Result<()> {
        self.delete(&["api", "payment", payment_id]).await
    }

    async fn make_payment(&self, payment: &NewPayment) -> Result<Payment> {
        self.post_json(&["api", "payment"], payment).await
    }
}
