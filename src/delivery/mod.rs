//! Delivery generation and scheduling

pub mod generator;
pub mod scheduler;

pub use generator::{DeliveryKind, DeliveryPlan, generate_delivery};
pub use scheduler::{DeliveryScheduler, SchedulerPhase, schedule_delivery, spawn_ball};
