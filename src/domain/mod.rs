//! Domain layer: loan parameters, schedules, simulation records and the ports
//! through which the application reaches its collaborators.

pub mod loan;
pub mod ports;
pub mod schedule;
pub mod simulation;
