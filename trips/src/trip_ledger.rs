use crate::ledger::{validate_draft, validate_trip};
use actix::prelude::*;
use chrono::Utc;
use colored::Color;
use common::errors::TripError;
use common::logger::Logger;
use common::messages::{
    AddExpense, AddTrip, DeleteExpense, DeleteTrip, EditExpense, LoadTrips, SignIn, SignOut,
};
use common::types::session::Session;
use common::types::trip::{Expense, ExpenseDraft, Trip, TripWithExpenses};
use uuid::Uuid;

/// The `TripLedger` actor keeps the trips of the signed-in user and the
/// expenses recorded against them.
///
/// # Responsibilities
/// - Gates every operation on an active [`Session`].
/// - Validates trips and expense drafts before storing them.
/// - Only lets users see and change their own trips.
/// - Removes a trip's expenses together with the trip.
pub struct TripLedger {
    /// Trips in insertion order.
    pub trips: Vec<Trip>,
    /// Expenses in insertion order.
    pub expenses: Vec<Expense>,
    /// The signed-in user, if any.
    pub session: Option<Session>,
    pub logger: Logger,
}

impl TripLedger {
    pub fn new() -> Self {
        Self {
            trips: Vec::new(),
            expenses: Vec::new(),
            session: None,
            logger: Logger::new("Trip Ledger", Color::Cyan),
        }
    }

    fn current_user(&self) -> Result<String, TripError> {
        self.session
            .as_ref()
            .map(|session| session.user_id.clone())
            .ok_or(TripError::Unauthenticated)
    }

    /// Index of a trip owned by `user_id`. Trips of other users are reported
    /// as missing.
    fn owned_trip(&self, user_id: &str, trip_id: &str) -> Result<usize, TripError> {
        self.trips
            .iter()
            .position(|trip| trip.id == trip_id && trip.user_id == user_id)
            .ok_or_else(|| TripError::TripNotFound(trip_id.to_string()))
    }

    fn owned_expense(&self, user_id: &str, expense_id: &str) -> Result<usize, TripError> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == expense_id)
            .ok_or_else(|| TripError::ExpenseNotFound(expense_id.to_string()))?;
        self.owned_trip(user_id, &self.expenses[index].trip_id)
            .map_err(|_| TripError::ExpenseNotFound(expense_id.to_string()))?;
        Ok(index)
    }

    fn apply_draft(expense: &mut Expense, draft: ExpenseDraft) {
        expense.payee = draft.payee.trim().to_string();
        expense.description = draft.description.trim().to_string();
        expense.amount = draft.amount;
        expense.currency = draft.currency;
        expense.expense_type = draft.expense_type;
        expense.split_count = draft.split_count;
    }
}

impl Default for TripLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for TripLedger {
    type Context = Context<Self>;
}

impl Handler<SignIn> for TripLedger {
    type Result = ();

    fn handle(&mut self, msg: SignIn, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!("Signed in as {}.", msg.session.email));
        self.session = Some(msg.session);
    }
}

impl Handler<SignOut> for TripLedger {
    type Result = ();

    fn handle(&mut self, _msg: SignOut, _ctx: &mut Self::Context) -> Self::Result {
        if let Some(session) = self.session.take() {
            self.logger.info(format!("{} signed out.", session.email));
        }
    }
}

impl Handler<AddTrip> for TripLedger {
    type Result = Result<Trip, TripError>;

    /// Handles the `AddTrip` message by storing a new trip owned by the
    /// signed-in user.
    fn handle(&mut self, msg: AddTrip, _ctx: &mut Self::Context) -> Self::Result {
        let user_id = self.current_user()?;
        validate_trip(&msg.title, &msg.start_location, &msg.destination)?;
        let trip = Trip {
            id: Uuid::new_v4().to_string(),
            user_id,
            title: msg.title.trim().to_string(),
            start_location: msg.start_location.trim().to_string(),
            destination: msg.destination.trim().to_string(),
            created_at: Utc::now(),
        };
        self.logger.info(format!(
            "Trip '{}' added ({} -> {}).",
            trip.title, trip.start_location, trip.destination
        ));
        self.trips.push(trip.clone());
        Ok(trip)
    }
}

impl Handler<DeleteTrip> for TripLedger {
    type Result = Result<(), TripError>;

    /// Handles the `DeleteTrip` message by removing the trip's expenses and
    /// then the trip itself.
    fn handle(&mut self, msg: DeleteTrip, _ctx: &mut Self::Context) -> Self::Result {
        let user_id = self.current_user()?;
        let index = self.owned_trip(&user_id, &msg.trip_id)?;
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.trip_id != msg.trip_id);
        let trip = self.trips.remove(index);
        self.logger.info(format!(
            "Trip '{}' deleted with {} expenses.",
            trip.title,
            before - self.expenses.len()
        ));
        Ok(())
    }
}

impl Handler<AddExpense> for TripLedger {
    type Result = Result<Expense, TripError>;

    fn handle(&mut self, msg: AddExpense, _ctx: &mut Self::Context) -> Self::Result {
        let user_id = self.current_user()?;
        self.owned_trip(&user_id, &msg.trip_id)?;
        validate_draft(&msg.draft)?;
        let mut expense = Expense {
            id: Uuid::new_v4().to_string(),
            trip_id: msg.trip_id,
            payee: String::new(),
            description: String::new(),
            amount: 0.0,
            currency: msg.draft.currency,
            expense_type: msg.draft.expense_type,
            split_count: 1,
            created_at: Utc::now(),
        };
        Self::apply_draft(&mut expense, msg.draft);
        self.logger.debug(format!(
            "Expense {} {:.2} paid by {} added.",
            expense.currency, expense.amount, expense.payee
        ));
        self.expenses.push(expense.clone());
        Ok(expense)
    }
}

impl Handler<EditExpense> for TripLedger {
    type Result = Result<Expense, TripError>;

    fn handle(&mut self, msg: EditExpense, _ctx: &mut Self::Context) -> Self::Result {
        let user_id = self.current_user()?;
        let index = self.owned_expense(&user_id, &msg.expense_id)?;
        validate_draft(&msg.draft)?;
        let expense = &mut self.expenses[index];
        Self::apply_draft(expense, msg.draft);
        Ok(expense.clone())
    }
}

impl Handler<DeleteExpense> for TripLedger {
    type Result = Result<(), TripError>;

    fn handle(&mut self, msg: DeleteExpense, _ctx: &mut Self::Context) -> Self::Result {
        let user_id = self.current_user()?;
        let index = self.owned_expense(&user_id, &msg.expense_id)?;
        self.expenses.remove(index);
        Ok(())
    }
}

impl Handler<LoadTrips> for TripLedger {
    type Result = Result<Vec<TripWithExpenses>, TripError>;

    /// Handles the `LoadTrips` message by collecting the user's trips, newest
    /// first, each with its expenses newest first. Entries created within the
    /// same instant keep the newest insertion first.
    fn handle(&mut self, _msg: LoadTrips, _ctx: &mut Self::Context) -> Self::Result {
        let user_id = self.current_user()?;
        let mut trips: Vec<TripWithExpenses> = self
            .trips
            .iter()
            .rev()
            .filter(|trip| trip.user_id == user_id)
            .map(|trip| {
                let mut expenses: Vec<Expense> = self
                    .expenses
                    .iter()
                    .rev()
                    .filter(|expense| expense.trip_id == trip.id)
                    .cloned()
                    .collect();
                expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                TripWithExpenses {
                    trip: trip.clone(),
                    expenses,
                }
            })
            .collect();
        trips.sort_by(|a, b| b.trip.created_at.cmp(&a.trip.created_at));
        Ok(trips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::trip::Currency;

    async fn signed_in_ledger() -> Addr<TripLedger> {
        let ledger = TripLedger::new().start();
        ledger
            .send(SignIn {
                session: Session::new("user-1", "ana@example.com"),
            })
            .await
            .unwrap();
        ledger
    }

    fn add_trip(title: &str) -> AddTrip {
        AddTrip {
            title: title.to_string(),
            start_location: "Lyon".to_string(),
            destination: "Geneva".to_string(),
        }
    }

    fn draft(amount: f64) -> ExpenseDraft {
        ExpenseDraft {
            payee: "Ana".to_string(),
            description: "Train".to_string(),
            amount,
            currency: Currency::EUR,
            ..ExpenseDraft::default()
        }
    }

    #[actix_rt::test]
    async fn test_operations_require_a_session() {
        let ledger = TripLedger::new().start();
        let result = ledger.send(add_trip("Alps")).await.unwrap();
        assert_eq!(result.unwrap_err(), TripError::Unauthenticated);
        let result = ledger.send(LoadTrips).await.unwrap();
        assert_eq!(result.unwrap_err(), TripError::Unauthenticated);
    }

    #[actix_rt::test]
    async fn test_trips_load_newest_first_with_expenses() {
        let ledger = signed_in_ledger().await;
        let first = ledger.send(add_trip("Alps")).await.unwrap().unwrap();
        let second = ledger.send(add_trip("Coast")).await.unwrap().unwrap();
        let dinner = ledger
            .send(AddExpense {
                trip_id: first.id.clone(),
                draft: draft(30.0),
            })
            .await
            .unwrap()
            .unwrap();
        let hotel = ledger
            .send(AddExpense {
                trip_id: first.id.clone(),
                draft: draft(120.0),
            })
            .await
            .unwrap()
            .unwrap();

        let trips = ledger.send(LoadTrips).await.unwrap().unwrap();

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].trip.id, second.id);
        assert_eq!(trips[1].trip.id, first.id);
        let expense_ids: Vec<&str> = trips[1].expenses.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(expense_ids, vec![hotel.id.as_str(), dinner.id.as_str()]);
        assert!(trips[0].expenses.is_empty());
    }

    #[actix_rt::test]
    async fn test_delete_trip_removes_its_expenses() {
        let ledger = signed_in_ledger().await;
        let trip = ledger.send(add_trip("Alps")).await.unwrap().unwrap();
        let expense = ledger
            .send(AddExpense {
                trip_id: trip.id.clone(),
                draft: draft(10.0),
            })
            .await
            .unwrap()
            .unwrap();

        ledger
            .send(DeleteTrip {
                trip_id: trip.id.clone(),
            })
            .await
            .unwrap()
            .unwrap();

        assert!(ledger.send(LoadTrips).await.unwrap().unwrap().is_empty());
        let result = ledger
            .send(DeleteExpense {
                expense_id: expense.id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(result, Err(TripError::ExpenseNotFound(expense.id)));
    }

    #[actix_rt::test]
    async fn test_other_users_cannot_touch_a_trip() {
        let ledger = signed_in_ledger().await;
        let trip = ledger.send(add_trip("Alps")).await.unwrap().unwrap();
        ledger.send(SignOut).await.unwrap();
        ledger
            .send(SignIn {
                session: Session::new("user-2", "bo@example.com"),
            })
            .await
            .unwrap();

        let result = ledger
            .send(DeleteTrip {
                trip_id: trip.id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(result, Err(TripError::TripNotFound(trip.id.clone())));
        let result = ledger
            .send(AddExpense {
                trip_id: trip.id.clone(),
                draft: draft(5.0),
            })
            .await
            .unwrap();
        assert!(result.is_err());
        assert!(ledger.send(LoadTrips).await.unwrap().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_edit_expense_validates_and_updates() {
        let ledger = signed_in_ledger().await;
        let trip = ledger.send(add_trip("Alps")).await.unwrap().unwrap();
        let expense = ledger
            .send(AddExpense {
                trip_id: trip.id.clone(),
                draft: draft(10.0),
            })
            .await
            .unwrap()
            .unwrap();

        let rejected = ledger
            .send(EditExpense {
                expense_id: expense.id.clone(),
                draft: draft(-1.0),
            })
            .await
            .unwrap();
        assert!(matches!(
            rejected,
            Err(TripError::Invalid { field: "amount", .. })
        ));

        let edited = ledger
            .send(EditExpense {
                expense_id: expense.id.clone(),
                draft: ExpenseDraft {
                    split_count: 4,
                    ..draft(48.0)
                },
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(edited.id, expense.id);
        assert_eq!(edited.amount, 48.0);
        assert_eq!(edited.split_count, 4);
        assert_eq!(edited.created_at, expense.created_at);
    }

    #[actix_rt::test]
    async fn test_blank_trip_is_rejected() {
        let ledger = signed_in_ledger().await;
        let result = ledger.send(add_trip("   ")).await.unwrap();
        assert!(matches!(
            result,
            Err(TripError::Invalid { field: "title", .. })
        ));
    }
}
