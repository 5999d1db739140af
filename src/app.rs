//! Route-to-view wiring, the job the browser router used to do.

use std::sync::Arc;

use crate::config::PortalConfig;
use crate::error::{PortalError, Result};
use crate::routes::Route;
use crate::services::{AdmissionService, ApplicationService, BackendClient, PaymentService};
use crate::views::{
    AdminApplicationView, AdmissionPanelView, DashboardView, MakePaymentView, PaymentDetailView,
    PaymentPanelView, StudentAdmissionView, StudentApplicationView, StudentApplicationsView, View,
};

/// Shared service handles every view is built from.
#[derive(Clone)]
pub struct Portal {
    admissions: Arc<dyn AdmissionService>,
    applications: Arc<dyn ApplicationService>,
    payments: Arc<dyn PaymentService>,
}

impl Portal {
    pub fn new(
        admissions: Arc<dyn AdmissionService>,
        applications: Arc<dyn ApplicationService>,
        payments: Arc<dyn PaymentService>,
    ) -> Self {
        Self {
            admissions,
            applications,
            payments,
        }
    }

    /// Portal backed by the HTTP client for `config`.
    pub fn connect(config: &PortalConfig) -> Result<Self> {
        let client = Arc::new(BackendClient::new(config)?);
        Ok(Self::new(client.clone(), client.clone(), client))
    }

    /// Build the (unloaded) view for a route.
    pub fn view_for(&self, route: &Route) -> Result<Box<dyn View>> {
        let view: Box<dyn View> = match route {
            Route::Dashboard => Box::new(DashboardView),
            Route::StudentApplications { email_id } => Box::new(StudentApplicationsView::new(
                email_id.clone(),
                self.applications.clone(),
            )),
            Route::Application { application_id } => Box::new(StudentApplicationView::new(
                application_id.clone(),
                self.applications.clone(),
                self.admissions.clone(),
            )),
            Route::ApplicationAdmission { application_id } => Box::new(StudentAdmissionView::new(
                application_id.clone(),
                self.admissions.clone(),
                self.applications.clone(),
            )),
            Route::ApplicationPayment { application_id } => Box::new(MakePaymentView::new(
                application_id.clone(),
                self.applications.clone(),
                self.payments.clone(),
            )),
            Route::PaymentDetail { payment_id } => Box::new(PaymentDetailView::new(
                payment_id.clone(),
                self.payments.clone(),
            )),
            Route::AdmissionPanel => Box::new(AdmissionPanelView::new(self.admissions.clone())),
            Route::PaymentPanel => Box::new(PaymentPanelView::new(self.payments.clone())),
            Route::AdminApplication { application_id } => Box::new(AdminApplicationView::new(
                application_id.clone(),
                self.applications.clone(),
                self.admissions.clone(),
            )),
            Route::ProgramScheduleApply => {
                return Err(PortalError::UnsupportedRoute(route.path()));
            }
        };
        Ok(view)
    }

    /// Build and load the view for a route.
    pub async fn open(&self, route: &Route) -> Result<Box<dyn View>> {
        let mut view = self.view_for(route)?;
        tracing::info!(route = %route, "opening view");
        view.load().await;
        Ok(view)
    }
}
