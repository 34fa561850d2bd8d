use crate::errors::TripError;
use crate::types::session::Session;
use crate::types::trip::{Expense, ExpenseDraft, Trip, TripWithExpenses};
use actix::Message;
use serde::{Deserialize, Serialize};

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct SignIn {
    pub session: Session,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct SignOut;

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<Trip, TripError>")]
pub struct AddTrip {
    pub title: String,
    pub start_location: String,
    pub destination: String,
}

/// Deletes a trip together with all of its expenses.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<(), TripError>")]
pub struct DeleteTrip {
    pub trip_id: String,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<Expense, TripError>")]
pub struct AddExpense {
    pub trip_id: String,
    pub draft: ExpenseDraft,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<Expense, TripError>")]
pub struct EditExpense {
    pub expense_id: String,
    pub draft: ExpenseDraft,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<(), TripError>")]
pub struct DeleteExpense {
    pub expense_id: String,
}

/// Loads the signed-in user's trips, newest first, each with its expenses.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<Vec<TripWithExpenses>, TripError>")]
pub struct LoadTrips;
