use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// The four fields collected from a user, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionField {
    Budget,
    City,
    InvestmentType,
    TargetAudience,
}

impl SubmissionField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionField::Budget => "budget",
            SubmissionField::City => "city",
            SubmissionField::InvestmentType => "investmentType",
            SubmissionField::TargetAudience => "targetAudience",
        }
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A possibly partial submission, as it travels over the wire
/// (`POST /api/user-data`, `POST /api/proxy/ai`) or while a
/// conversation is still collecting answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub budget: Option<f64>,
    pub city: Option<String>,
    pub investment_type: Option<String>,
    pub target_audience: Option<String>,
}

impl Submission {
    /// First field that is still unset, in collection order.
    pub fn next_missing(&self) -> Option<SubmissionField> {
        if self.budget.is_none() {
            Some(SubmissionField::Budget)
        } else if self.city.is_none() {
            Some(SubmissionField::City)
        } else if self.investment_type.is_none() {
            Some(SubmissionField::InvestmentType)
        } else if self.target_audience.is_none() {
            Some(SubmissionField::TargetAudience)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.next_missing().is_none()
    }

    /// Converts into a [`CompleteSubmission`], reporting the first missing field.
    pub fn complete(self) -> Result<CompleteSubmission, SubmissionField> {
        match (
            self.budget,
            self.city,
            self.investment_type,
            self.target_audience,
        ) {
            (Some(budget), Some(city), Some(investment_type), Some(target_audience)) => {
                Ok(CompleteSubmission {
                    budget,
                    city,
                    investment_type,
                    target_audience,
                })
            }
            (None, ..) => Err(SubmissionField::Budget),
            (_, None, ..) => Err(SubmissionField::City),
            (_, _, None, _) => Err(SubmissionField::InvestmentType),
            (.., None) => Err(SubmissionField::TargetAudience),
        }
    }
}

/// A submission with every field set. Only this type is persisted or sent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSubmission {
    pub budget: f64,
    pub city: String,
    pub investment_type: String,
    pub target_audience: String,
}

impl From<CompleteSubmission> for Submission {
    fn from(value: CompleteSubmission) -> Self {
        Self {
            budget: Some(value.budget),
            city: Some(value.city),
            investment_type: Some(value.investment_type),
            target_audience: Some(value.target_audience),
        }
    }
}

/// A persisted submission row. Field names follow the `user_data` table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct StoredSubmission {
    pub id: i64,
    pub budget: f64,
    pub city: String,
    pub investment_type: String,
    pub target_audience: String,
    pub created_at: DateTime<Utc>,
}

impl StoredSubmission {
    pub fn submission(&self) -> CompleteSubmission {
        CompleteSubmission {
            budget: self.budget,
            city: self.city.clone(),
            investment_type: self.investment_type.clone(),
            target_audience: self.target_audience.clone(),
        }
    }
}
