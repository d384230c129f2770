use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ExpenseCategory {
    #[serde(rename = "FLIGHT")]
    Flight,
    #[serde(rename = "HOTEL")]
    Hotel,
    #[serde(rename = "FOOD")]
    Food,
    #[serde(rename = "TRANSPORT")]
    Transport,
    #[serde(rename = "ACTIVITY")]
    Activity,
    #[serde(rename = "SHOPPING")]
    Shopping,
    #[serde(rename = "ENTERTAINMENT")]
    Entertainment,
    #[default]
    #[serde(rename = "OTHER")]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Flight,
        ExpenseCategory::Hotel,
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Activity,
        ExpenseCategory::Shopping,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Flight => "FLIGHT",
            ExpenseCategory::Hotel => "HOTEL",
            ExpenseCategory::Food => "FOOD",
            ExpenseCategory::Transport => "TRANSPORT",
            ExpenseCategory::Activity => "ACTIVITY",
            ExpenseCategory::Shopping => "SHOPPING",
            ExpenseCategory::Entertainment => "ENTERTAINMENT",
            ExpenseCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FLIGHT" => Ok(ExpenseCategory::Flight),
            "HOTEL" => Ok(ExpenseCategory::Hotel),
            "FOOD" => Ok(ExpenseCategory::Food),
            "TRANSPORT" => Ok(ExpenseCategory::Transport),
            "ACTIVITY" => Ok(ExpenseCategory::Activity),
            "SHOPPING" => Ok(ExpenseCategory::Shopping),
            "ENTERTAINMENT" => Ok(ExpenseCategory::Entertainment),
            "OTHER" => Ok(ExpenseCategory::Other),
            other => Err(AppError::Data(format!("unknown expense category '{other}'"))),
        }
    }
}

/// A single spend against a trip's budget. Amounts are validated as
/// non-negative at the screen boundary, not by storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub trip_id: String,
    pub title: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub currency: String,
    pub date: NaiveDate,
    pub receipt_image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        trip_id: impl Into<String>,
        title: impl Into<String>,
        category: ExpenseCategory,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            trip_id: trip_id.into(),
            title: title.into(),
            category,
            amount,
            currency: "USD".to_string(),
            date,
            receipt_image_url: None,
            latitude: None,
            longitude: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
