//! admission-portal: terminal front-end for the online admission backend
//!
//! Usage:
//!   admission-portal applications --email jane@example.com
//!   admission-portal admissions --college "Test College"
//!   admission-portal review --id 123
//!   admission-portal open /admin/payments --press View --row 0 --follow
//!   ADMISSION_API_URL=http://backend:8080 admission-portal payments

use clap::{Parser, Subcommand};

use admission_portal::config::PortalConfig;
use admission_portal::models::DecisionStatus;
use admission_portal::routes::{History, Route};
use admission_portal::ui::Action;
use admission_portal::{logging, Portal};

#[derive(Parser)]
#[command(name = "admission-portal")]
#[command(about = "Terminal front-end for the online admission system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL (defaults to http://localhost:8080)
    #[arg(short, long, env = "ADMISSION_API_URL")]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render any portal path, optionally pressing one of its buttons
    Open {
        path: String,
        #[arg(short, long)]
        press: Option<String>,
        /// Which of the buttons with that label (0-based)
        #[arg(short, long, default_value_t = 0)]
        row: usize,
        /// Also render the page a navigation leads to
        #[arg(short, long)]
        follow: bool,
    },
    Applications {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        status: Option<String>,
    },
    Application {
        #[arg(short, long)]
        id: String,
    },
    Admission {
        #[arg(short, long)]
        id: String,
    },
    Admissions {
        #[arg(short, long)]
        college: Option<String>,
    },
    /// Admin review of one application
    Review {
        #[arg(short, long)]
        id: String,
    },
    Payments,
    Payment {
        #[arg(short, long)]
        id: String,
    },
    Pay {
        #[arg(short, long)]
        id: String,
        #[arg(short, long)]
        amount: f64,
    },
    DeleteAdmission {
        #[arg(short, long)]
        id: String,
    },
    DeletePayment {
        #[arg(short, long)]
        id: String,
    },
}

/// What a command does once its view is loaded.
enum Step {
    Show,
    Act(Action),
    Press { label: String, row: usize },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = PortalConfig::from_env()?;
    if let Some(url) = &cli.url {
        config = config.with_base_url(url)?;
    }
    let _log_guard = logging::init(config.log_format);
    tracing::debug!(backend = %config.api_base_url, "starting");

    let portal = Portal::connect(&config)?;

    let mut follow = true;
    let (route, step) = match cli.command {
        Commands::Open { path, press, row, follow: f } => {
            follow = f;
            let step = match press {
                Some(label) => Step::Press { label, row },
                None => Step::Show,
            };
            (path.parse::<Route>()?, step)
        }
        Commands::Applications { email, status } => (
            Route::StudentApplications { email_id: email },
            match status {
                Some(s) if !s.eq_ignore_ascii_case("all") => {
                    Step::Act(Action::FilterStatus(Some(DecisionStatus::from(s))))
                }
                _ => Step::Show,
            },
        ),
        Commands::Application { id } => (Route::Application { application_id: id }, Step::Show),
        Commands::Admission { id } => (
            Route::ApplicationAdmission { application_id: id },
            Step::Show,
        ),
        Commands::Admissions { college } => (
            Route::AdmissionPanel,
            match college {
                Some(name) => Step::Act(Action::FilterCollege(Some(name))),
                None => Step::Show,
            },
        ),
        Commands::Review { id } => (Route::AdminApplication { application_id: id }, Step::Show),
        Commands::Payments => (Route::PaymentPanel, Step::Show),
        Commands::Payment { id } => (Route::PaymentDetail { payment_id: id }, Step::Show),
        Commands::Pay { id, amount } => (
            Route::ApplicationPayment { application_id: id },
            Step::Act(Action::SubmitPayment { amount }),
        ),
        Commands::DeleteAdmission { id } => (
            Route::AdmissionPanel,
            Step::Act(Action::DeleteAdmission { application_id: id }),
        ),
        Commands::DeletePayment { id } => (
            Route::PaymentPanel,
            Step::Act(Action::DeletePayment { payment_id: id }),
        ),
    };

    let history = History::new();
    let mut view = portal.open(&route).await?;
    match step {
        Step::Show => {}
        Step::Act(action) => view.handle(action, &history).await,
        Step::Press { label, row } => view.press(&label, row, &history).await?,
    }

    match history.last() {
        Some(next) if follow => match portal.open(&next).await {
            Ok(next_view) => print!("{}", next_view.render()),
            // Targets such as the application form live outside this portal.
            Err(err) => println!("Navigate to {next} ({err})"),
        },
        Some(next) => println!("Navigate to {next}"),
        None => print!("{}", view.render()),
    }

    Ok(())
}
