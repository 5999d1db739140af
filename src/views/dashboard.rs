use async_trait::async_trait;

use super::View;
use crate::routes::{Navigator, Route};
use crate::ui::{Action, Button, ButtonStyle, Page};

/// Landing page. Nothing to fetch.
#[derive(Debug, Default)]
pub struct DashboardView;

#[async_trait]
impl View for DashboardView {
    async fn load(&mut self) {}

    fn render(&self) -> Page {
        let mut page = Page::new("DashBoard");
        page.heading("Online Admission Portal");
        page.text("Track applications, admissions and payments.");
        page.button(Button::navigate("Admission Panel", ButtonStyle::Primary, Route::AdmissionPanel));
        page.button(Button::navigate("Payment Panel", ButtonStyle::Primary, Route::PaymentPanel));
        page.button(Button::navigate(
            "Apply to a Program",
            ButtonStyle::Secondary,
            Route::ProgramScheduleApply,
        ));
        page
    }

    async fn handle(&mut self, action: Action, nav: &dyn Navigator) {
        if let Action::Navigate(route) = action {
            nav.navigate(route);
        }
    }
}
