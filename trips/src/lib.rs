pub mod ledger;
pub mod trip_ledger;
