pub mod aggregator;
pub mod context;
pub mod event;
pub mod gate;
pub mod identity;
pub mod log_forward;
pub mod runner;
