//! View models: one per screen of the portal.
//!
//! A view owns its [`Loadable`] state, fetches through the service traits
//! and renders a [`Page`]. State only moves when a fetch settles:
//! `Idle -> Loading -> {Empty | Loaded | Failed}`.

use async_trait::async_trait;
use tracing::warn;

use crate::error::{PortalError, Result};
use crate::routes::Navigator;
use crate::ui::{Action, Button, ButtonStyle, Page};

mod admin_application;
mod admission_panel;
mod dashboard;
mod make_payment;
mod payment_detail;
mod payment_panel;
mod student_admission;
mod student_application;
mod student_applications;

pub use admin_application::AdminApplicationView;
pub use admission_panel::AdmissionPanelView;
pub use dashboard::DashboardView;
pub use make_payment::MakePaymentView;
pub use payment_detail::PaymentDetailView;
pub use payment_panel::PaymentPanelView;
pub use student_admission::StudentAdmissionView;
pub use student_application::{ApplicationDetail, StudentApplicationView};
pub use student_applications::StudentApplicationsView;

#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    /// The fetch succeeded but there was nothing to show.
    Empty,
    Loaded(T),
    Failed(String),
}

impl<T> Loadable<T> {
    /// Settle a finished fetch. `is_empty` decides between `Empty` and
    /// `Loaded` for successful results.
    pub fn settle(result: Result<T>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Ok(value) if is_empty(&value) => Loadable::Empty,
            Ok(value) => Loadable::Loaded(value),
            Err(err) => {
                warn!(error = %err, "load failed");
                Loadable::Failed(err.to_string())
            }
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Loadable::Idle | Loadable::Loading)
    }
}

/// A screen of the portal.
#[async_trait]
pub trait View: Send {
    /// Fetch everything the screen needs. Failures become visible state.
    async fn load(&mut self);

    fn render(&self) -> Page;

    /// Apply an action that one of the rendered buttons carries.
    async fn handle(&mut self, action: Action, nav: &dyn Navigator);

    /// Press the `index`-th button labelled `label`, as a click would.
    async fn press(&mut self, label: &str, index: usize, nav: &dyn Navigator) -> Result<()> {
        let action = self
            .render()
            .button_labeled(label, index)
            .map(|b| b.action.clone())
            .ok_or_else(|| PortalError::NoSuchButton {
                label: label.to_string(),
                index,
            })?;
        self.handle(action, nav).await;
        Ok(())
    }
}

/// Render the non-data states every view shares. Returns `true` when the
/// page was filled in and the caller should stop.
pub(crate) fn render_pending<T>(state: &Loadable<T>, page: &mut Page) -> bool {
    match state {
        Loadable::Idle | Loadable::Loading => {
            page.text("Loading...");
            true
        }
        Loadable::Failed(message) => {
            page.notice(format!("Could not load data from the admission service: {message}"));
            page.button(Button::new("Retry", ButtonStyle::Primary, Action::Retry));
            true
        }
        Loadable::Empty | Loadable::Loaded(_) => false,
    }
}

pub(crate) fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
