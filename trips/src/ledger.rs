use common::errors::TripError;
use common::types::trip::{Currency, Expense, ExpenseDraft};

/// Sums the expenses per currency and renders them as
/// `"USD 12.50 + EUR 3.00"`, currencies in order of first appearance.
/// An empty slice renders as an empty string.
pub fn total_by_currency(expenses: &[Expense]) -> String {
    let mut totals: Vec<(Currency, f64)> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|(currency, _)| *currency == expense.currency) {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense.currency, expense.amount)),
        }
    }
    totals
        .iter()
        .map(|(currency, total)| format!("{} {:.2}", currency, total))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Share of one person in an expense, e.g. `"EUR 7.50"`.
pub fn split_amount(expense: &Expense) -> String {
    let share = expense.amount / f64::from(expense.split_count.max(1));
    format!("{} {:.2}", expense.currency, share)
}

pub fn validate_trip(title: &str, start_location: &str, destination: &str) -> Result<(), TripError> {
    for (field, value) in [
        ("title", title),
        ("start_location", start_location),
        ("destination", destination),
    ] {
        if value.trim().is_empty() {
            return Err(TripError::Invalid {
                field,
                reason: "must not be blank".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_draft(draft: &ExpenseDraft) -> Result<(), TripError> {
    if draft.payee.trim().is_empty() {
        return Err(TripError::Invalid {
            field: "payee",
            reason: "must not be blank".to_string(),
        });
    }
    if !draft.amount.is_finite() || draft.amount <= 0.0 {
        return Err(TripError::Invalid {
            field: "amount",
            reason: format!("must be a positive number, got {}", draft.amount),
        });
    }
    if draft.split_count < 1 {
        return Err(TripError::Invalid {
            field: "split_count",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
