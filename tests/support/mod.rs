//! In-memory backend shared by the view tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use admission_portal::error::{PortalError, Result};
use admission_portal::models::{Admission, Application, College, NewPayment, Payment};
use admission_portal::services::{AdmissionService, ApplicationService, PaymentService};
use admission_portal::Portal;

#[derive(Default)]
pub struct FakeState {
    pub application_by_id: HashMap<String, Application>,
    pub applications_by_email: HashMap<String, Vec<Application>>,
    pub admission_by_application: HashMap<String, Admission>,
    pub admissions: Vec<Admission>,
    pub colleges: Vec<College>,
    pub payments: Vec<Payment>,
    pub payment_by_id: HashMap<String, Payment>,
    pub created_payments: Vec<NewPayment>,
    /// Method name -> how many upcoming calls fail with HTTP 500.
    pub failures: HashMap<&'static str, usize>,
    /// Every call in order, as `method(arg)`.
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn fail_next(&self, method: &'static str, times: usize) {
        self.state().failures.insert(method, times);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Number of calls made to `method`, whatever the argument.
    pub fn count(&self, method: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.split('(').next() == Some(method))
            .count()
    }

    fn record(&self, method: &'static str, arg: &str) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(format!("{method}({arg})"));
        if let Some(left) = state.failures.get_mut(method) {
            if *left > 0 {
                *left -= 1;
                return Err(PortalError::Status {
                    method: "GET",
                    url: format!("fake://{method}"),
                    status: 500,
                });
            }
        }
        Ok(state)
    }
}

#[async_trait]
impl AdmissionService for FakeBackend {
    async fn admission_by_application(&self, application_id: &str) -> Result<Option<Admission>> {
        let state = self.record("admission_by_application", application_id)?;
        Ok(state.admission_by_application.get(application_id).cloned())
    }

    async fn all_admissions(&self) -> Result<Vec<Admission>> {
        Ok(self.record("all_admissions", "")?.admissions.clone())
    }

    async fn all_colleges(&self) -> Result<Vec<College>> {
        Ok(self.record("all_colleges", "")?.colleges.clone())
    }

    async fn delete_admission(&self, application_id: &str) -> Result<()> {
        let mut state = self.record("delete_admission", application_id)?;
        state
            .admissions
            .retain(|a| a.application_id() != Some(application_id));
        Ok(())
    }
}

#[async_trait]
impl ApplicationService for FakeBackend {
    async fn application_by_id(&self, application_id: &str) -> Result<Option<Application>> {
        let state = self.record("application_by_id", application_id)?;
        Ok(state.application_by_id.get(application_id).cloned())
    }

    async fn applications_by_email(&self, email_id: &str) -> Result<Vec<Application>> {
        let state = self.record("applications_by_email", email_id)?;
        Ok(state
            .applications_by_email
            .get(email_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl PaymentService for FakeBackend {
    async fn all_payments(&self) -> Result<Vec<Payment>> {
        Ok(self.record("all_payments", "")?.payments.clone())
    }

    async fn payment_by_id(&self, payment_id: &str) -> Result<Option<Payment>> {
        let state = self.record("payment_by_id", payment_id)?;
        Ok(state.payment_by_id.get(payment_id).cloned())
    }

    async fn delete_payment(&self, payment_id: &str) -> Result<()> {
        let mut state = self.record("delete_payment", payment_id)?;
        state
            .payments
            .retain(|p| p.payment_id.as_deref() != Some(payment_id));
        Ok(())
    }

    async fn make_payment(&self, payment: &NewPayment) -> Result<Payment> {
        let mut state = self.record("make_payment", &payment.application_id)?;
        state.created_payments.push(payment.clone());
        Ok(Payment {
            payment_id: Some(format!("{}", state.created_payments.len())),
            payment_amount: Some(payment.payment_amount),
            payment_status: Some(payment.payment_status.clone()),
            email_id: Some(payment.email_id.clone()),
            ..Payment::default()
        })
    }
}

pub fn portal(backend: &Arc<FakeBackend>) -> Portal {
    Portal::new(backend.clone(), backend.clone(), backend.clone())
}

/// Build a record from the same JSON shape the backend sends.
pub fn from_json<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture matches the wire format")
}
