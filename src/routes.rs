//! Client-side routes and the navigation sink views report to.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use crate::error::PortalError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/dashboard`
    Dashboard,
    /// `/program-schedule-apply`, owned by the application form.
    ProgramScheduleApply,
    /// `/applications/{emailId}`
    StudentApplications { email_id: String },
    /// `/application/{id}`
    Application { application_id: String },
    /// `/application/{id}/admission`
    ApplicationAdmission { application_id: String },
    /// `/application/{id}/payment`
    ApplicationPayment { application_id: String },
    /// `/payment/applicationId/{id}`. The id is the payment id.
    PaymentDetail { payment_id: String },
    /// `/admin/admissions`
    AdmissionPanel,
    /// `/admin/payments`
    PaymentPanel,
    /// `/admin/application/{id}`, the read-only review of one application.
    AdminApplication { application_id: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::ProgramScheduleApply => "/program-schedule-apply".to_string(),
            Route::StudentApplications { email_id } => {
                format!("/applications/{}", encode_segment(email_id))
            }
            Route::Application { application_id } => {
                format!("/application/{}", encode_segment(application_id))
            }
            Route::ApplicationAdmission { application_id } => {
                format!("/application/{}/admission", encode_segment(application_id))
            }
            Route::ApplicationPayment { application_id } => {
                format!("/application/{}/payment", encode_segment(application_id))
            }
            Route::PaymentDetail { payment_id } => {
                format!("/payment/applicationId/{}", encode_segment(payment_id))
            }
            Route::AdmissionPanel => "/admin/admissions".to_string(),
            Route::PaymentPanel => "/admin/payments".to_string(),
            Route::AdminApplication { application_id } => {
                format!("/admin/application/{}", encode_segment(application_id))
            }
        }
    }
}

/// Percent-encode everything but unreserved characters and `@`, so an id
/// stays one path segment.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~@".contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn decode_segment(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = raw.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = PortalError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let unknown = || PortalError::UnknownRoute(path.to_string());
        let decoded = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect::<Option<Vec<String>>>()
            .ok_or_else(unknown)?;
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

        let route = match segments.as_slice() {
            ["dashboard"] => Route::Dashboard,
            ["program-schedule-apply"] => Route::ProgramScheduleApply,
            ["applications", email] => Route::StudentApplications {
                email_id: email.to_string(),
            },
            ["application", id] => Route::Application {
                application_id: id.to_string(),
            },
            ["application", id, "admission"] => Route::ApplicationAdmission {
                application_id: id.to_string(),
            },
            ["application", id, "payment"] => Route::ApplicationPayment {
                application_id: id.to_string(),
            },
            ["payment", "applicationId", id] => Route::PaymentDetail {
                payment_id: id.to_string(),
            },
            ["admin", "admissions"] => Route::AdmissionPanel,
            ["admin", "payments"] => Route::PaymentPanel,
            ["admin", "application", id] => Route::AdminApplication {
                application_id: id.to_string(),
            },
            _ => return Err(unknown()),
        };
        Ok(route)
    }
}

/// Receives navigation requests from views, like a router's `navigate`.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every request in order.
#[derive(Debug, Default)]
pub struct History {
    visited: Mutex<Vec<Route>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.visited.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(to = %route, "navigate");
        self.lock().push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_parse_back_to_routes() {
        let routes = vec![
            Route::Dashboard,
            Route::ProgramScheduleApply,
            Route::StudentApplications { email_id: "test@example.com".into() },
            Route::Application { application_id: "123".into() },
            Route::ApplicationAdmission { application_id: "123".into() },
            Route::ApplicationPayment { application_id: "123".into() },
            Route::PaymentDetail { payment_id: "1".into() },
            Route::AdmissionPanel,
            Route::PaymentPanel,
            Route::AdminApplication { application_id: "123".into() },
        ];
        for route in routes {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn test_known_paths() {
        assert_eq!(
            Route::ApplicationPayment { application_id: "123".into() }.path(),
            "/application/123/payment"
        );
        assert_eq!(
            Route::PaymentDetail { payment_id: "1".into() }.to_string(),
            "/payment/applicationId/1"
        );
        assert_eq!("dashboard/".parse::<Route>().unwrap(), Route::Dashboard);
    }

    #[test]
    fn test_awkward_ids_round_trip() {
        let routes = vec![
            Route::Application { application_id: "12/3".into() },
            Route::StudentApplications { email_id: "first last@example.com".into() },
            Route::PaymentDetail { payment_id: "50%".into() },
            Route::ApplicationAdmission { application_id: "dé".into() },
        ];
        for route in routes {
            let path = route.path();
            assert_eq!(path.matches('/').count(), route_depth(&route), "{path}");
            assert_eq!(path.parse::<Route>().unwrap(), route);
        }
        assert_eq!(
            Route::Application { application_id: "12/3".into() }.path(),
            "/application/12%2F3"
        );
        assert!(matches!(
            "/application/%zz".parse::<Route>(),
            Err(PortalError::UnknownRoute(_))
        ));
    }

    fn route_depth(route: &Route) -> usize {
        match route {
            Route::ApplicationAdmission { .. } | Route::PaymentDetail { .. } => 3,
            _ => 2,
        }
    }

    #[test]
    fn test_unknown_path_is_an_error() {
        assert!(matches!(
            "/application".parse::<Route>(),
            Err(PortalError::UnknownRoute(_))
        ));
        assert!(matches!(
            "/admin/colleges".parse::<Route>(),
            Err(PortalError::UnknownRoute(_))
        ));
    }

    #[test]
    fn test_history_records_in_order() {
        let history = History::new();
        history.navigate(Route::Dashboard);
        history.navigate(Route::PaymentPanel);
        assert_eq!(history.routes(), vec![Route::Dashboard, Route::PaymentPanel]);
        assert_eq!(history.last(), Some(Route::PaymentPanel));
    }
}
