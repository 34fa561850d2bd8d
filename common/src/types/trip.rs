use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    /// Owner of the trip.
    pub user_id: String,
    pub title: String,
    pub start_location: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseType {
    Food,
    Accommodation,
    Transport,
    Activities,
    Shopping,
    #[default]
    Other,
}

impl ExpenseType {
    pub const ALL: [ExpenseType; 6] = [
        ExpenseType::Food,
        ExpenseType::Accommodation,
        ExpenseType::Transport,
        ExpenseType::Activities,
        ExpenseType::Shopping,
        ExpenseType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Food => "food",
            ExpenseType::Accommodation => "accommodation",
            ExpenseType::Transport => "transport",
            ExpenseType::Activities => "activities",
            ExpenseType::Shopping => "shopping",
            ExpenseType::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseType::Food => write!(f, "Food"),
            ExpenseType::Accommodation => write!(f, "Accommodation"),
            ExpenseType::Transport => write!(f, "Transport"),
            ExpenseType::Activities => write!(f, "Activities"),
            ExpenseType::Shopping => write!(f, "Shopping"),
            ExpenseType::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for ExpenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown expense type '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    AUD,
    CAD,
    CHF,
    CNY,
    INR,
    SGD,
}

impl Currency {
    pub const ALL: [Currency; 10] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::AUD,
        Currency::CAD,
        Currency::CHF,
        Currency::CNY,
        Currency::INR,
        Currency::SGD,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::CNY => "CNY",
            Currency::INR => "INR",
            Currency::SGD => "SGD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Currency::USD => "USD - US Dollar",
            Currency::EUR => "EUR - Euro",
            Currency::GBP => "GBP - British Pound",
            Currency::JPY => "JPY - Japanese Yen",
            Currency::AUD => "AUD - Australian Dollar",
            Currency::CAD => "CAD - Canadian Dollar",
            Currency::CHF => "CHF - Swiss Franc",
            Currency::CNY => "CNY - Chinese Yuan",
            Currency::INR => "INR - Indian Rupee",
            Currency::SGD => "SGD - Singapore Dollar",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported currency '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub trip_id: String,
    /// Who paid.
    pub payee: String,
    pub description: String,
    pub amount: f64,
    pub currency: Currency,
    pub expense_type: ExpenseType,
    /// Number of people sharing the expense.
    pub split_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Fields a user fills in when adding or editing an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub payee: String,
    pub description: String,
    pub amount: f64,
    pub currency: Currency,
    pub expense_type: ExpenseType,
    pub split_count: u32,
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self {
            payee: String::new(),
            description: String::new(),
            amount: 0.0,
            currency: Currency::default(),
            expense_type: ExpenseType::default(),
            split_count: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripWithExpenses {
    pub trip: Trip,
    /// Newest first.
    pub expenses: Vec<Expense>,
}
