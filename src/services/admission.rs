use async_trait::async_trait;

use super::BackendClient;
use crate::error::Result;
use crate::models::{Admission, College};

/// Admission decisions and the college lookup used to filter them.
#[async_trait]
pub trait AdmissionService: Send + Sync {
    /// `GET /api/admission/application/{applicationId}`
    async fn admission_by_application(&self, application_id: &str) -> Result<Option<Admission>>;

    /// `GET /api/admission`
    async fn all_admissions(&self) -> Result<Vec<Admission>>;

    /// `GET /api/colleges`
    async fn all_colleges(&self) -> Result<Vec<College>>;

    /// `DELETE /api/admission/{applicationId}`
    async fn delete_admission(&self, application_id: &str) -> Result<()>;
}

#[async_trait]
impl AdmissionService for BackendClient {
    async fn admission_by_application(&self, application_id: &str) -> Result<Option<Admission>> {
        self.get_optional(&["api", "admission", "application", application_id])
            .await
    }

    async fn all_admissions(&self) -> Result<Vec<Admission>> {
        self.get_list(&["api", "admission"]).await
    }

    async fn all_colleges(&self) -> Result<Vec<College>> {
        self.get_list(&["api", "colleges"]).await
    }

    async fn delete_admission(&self, application_id: &str) -> Result<()> {
        self.delete(&["api", "admission", application_id]).await
    }
}
