pub mod ledger;
pub mod queues;
