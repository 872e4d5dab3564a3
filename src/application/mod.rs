//! Application layer: the schedule engine and the simulation lifecycle.
//!
//! `amortization` is a pure function of the loan parameters. `lifecycle` drives a
//! single simulation through its asynchronous phases on top of `tokio`, talking to
//! the collaborator only through the `SimulationGateway` port.

pub mod amortization;
pub mod lifecycle;
