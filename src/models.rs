use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Decision state shared by applications and admissions.
/// Unknown spellings from the backend are kept verbatim and compare
/// case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecisionStatus {
    Pending,
    Accepted,
    Rejected,
    Other(String),
}

impl From<String> for DecisionStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => DecisionStatus::Pending,
            "accepted" => DecisionStatus::Accepted,
            "rejected" => DecisionStatus::Rejected,
            _ => DecisionStatus::Other(raw),
        }
    }
}

impl From<DecisionStatus> for String {
    fn from(status: DecisionStatus) -> Self {
        status.to_string()
    }
}

impl PartialEq for DecisionStatus {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DecisionStatus::Other(a), DecisionStatus::Other(b)) => same_spelling(a, b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for DecisionStatus {}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionStatus::Pending => f.write_str("Pending"),
            DecisionStatus::Accepted => f.write_str("Accepted"),
            DecisionStatus::Rejected => f.write_str("Rejected"),
            DecisionStatus::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Other(String),
}

impl From<String> for PaymentStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "paid" => PaymentStatus::Paid,
            "pending" => PaymentStatus::Pending,
            _ => PaymentStatus::Other(raw),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.to_string()
    }
}

impl PartialEq for PaymentStatus {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PaymentStatus::Other(a), PaymentStatus::Other(b)) => same_spelling(a, b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for PaymentStatus {}

fn same_spelling(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Paid => f.write_str("Paid"),
            PaymentStatus::Pending => f.write_str("Pending"),
            PaymentStatus::Other(raw) => f.write_str(raw),
        }
    }
}

/// Student application record. Also used for the nested application
/// summaries inside admissions and payments.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default, deserialize_with = "string_or_number")]
    pub application_id: Option<String>,
    pub applicant_full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub highest_qualification: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub final_year_percentage: Option<String>,
    pub goals: Option<String>,
    pub email_id: Option<String>,
    pub application_status: Option<DecisionStatus>,
    pub date_of_interview: Option<String>,
    pub schedule: Option<Schedule>,
}

impl Application {
    /// False for the `{}` the backend sends when nothing matched.
    pub fn is_present(&self) -> bool {
        self.application_id.is_some()
            || self.applicant_full_name.is_some()
            || self.application_status.is_some()
    }

    /// Program details, if the whole nested chain is populated.
    pub fn program(&self) -> Option<&ProgramSchedule> {
        self.schedule
            .as_ref()
            .and_then(|s| s.program_scheduled_response_dto.as_ref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub program_scheduled_response_dto: Option<ProgramSchedule>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSchedule {
    pub name: Option<String>,
    pub college_name: Option<String>,
    pub program_name: Option<String>,
    pub course_name: Option<String>,
    pub branch_name: Option<String>,
    pub eligibility: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub email_id: Option<String>,
    pub application: Option<Application>,
    pub admission_status: Option<DecisionStatus>,
    pub college: Option<College>,
    pub program: Option<Program>,
    pub course: Option<Course>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
}

impl Admission {
    pub fn is_present(&self) -> bool {
        self.admission_status.is_some() || self.email_id.is_some() || self.application.is_some()
    }

    pub fn is_accepted(&self) -> bool {
        self.admission_status == Some(DecisionStatus::Accepted)
    }

    /// Id of the application this admission decides, used as the delete key.
    pub fn application_id(&self) -> Option<&str> {
        self.application
            .as_ref()
            .and_then(|a| a.application_id.as_deref())
    }

    pub fn college_name(&self) -> Option<&str> {
        self.college.as_ref().and_then(|c| c.college_name.as_deref())
    }

    pub fn program_name(&self) -> Option<&str> {
        self.program.as_ref().and_then(|p| p.program_name.as_deref())
    }

    pub fn course_name(&self) -> Option<&str> {
        self.course.as_ref().and_then(|c| c.course_name.as_deref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, deserialize_with = "string_or_number")]
    pub payment_id: Option<String>,
    pub application: Option<Application>,
    pub payment_amount: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_date: Option<String>,
    pub email_id: Option<String>,
}

impl Payment {
    pub fn is_present(&self) -> bool {
        self.payment_id.is_some()
    }

    pub fn applicant_name(&self) -> Option<&str> {
        self.application
            .as_ref()
            .and_then(|a| a.applicant_full_name.as_deref())
    }
}

/// Body of `POST /api/payment`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub application_id: String,
    pub payment_amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_date: NaiveDate,
    pub email_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub college_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub program_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub branch_name: Option<String>,
}

/// Ids and years arrive as either JSON strings or numbers depending on the
/// backend endpoint; both are held as text.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}
