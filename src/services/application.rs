use async_trait::async_trait;

use super::BackendClient;
use crate::error::Result;
use crate::models::Application;

#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// `GET /api/application/{applicationId}`
    async fn application_by_id(&self, application_id: &str) -> Result<Option<Application>>;

    /// `GET /api/application/email/{emailId}`
    async fn applications_by_email(&self, email_id: &str) -> Result<Vec<Application>>;
}

#[async_trait]
impl ApplicationService for BackendClient {
    async fn application_by_id(&self, application_id: &str) -> Result<Option<Application>> {
        self.get_optional(&["api", "application", application_id])
            .await
    }

    async fn applications_by_email(&self, email_id: &str) -> Result<Vec<Application>> {
        self.get_list(&["api", "application", "email", email_id])
            .await
    }
}
