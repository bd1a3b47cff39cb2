#![forbid(unsafe_code)]
//! Rota — moteur de planification de rôles récurrents (équipes, plannings tournants).
//!
//! - Rôles traités par niveau de priorité, date par date.
//! - Rotation round-robin par rôle, capacité maximale par date.
//! - Zones d'exclusion selon la cadence de chaque personne (et ses rôles dépendants).
//! - Tout en UTC ; les exports lisent la grille via `json_fields` / `json_result`.

pub mod export;
pub mod input;
pub mod io;
pub mod model;
pub mod registry;
pub mod scheduler;

pub use export::{json_fields, json_result, PersonView, ScheduleRow};
pub use input::{InputError, ScheduleInput, ScheduleParams};
pub use io::RotaConfig;
pub use model::{
    Availability, Cadence, Person, PersonId, Role, RoleAssignment, RoleId, Unavailability,
};
pub use registry::{PersonRegistry, RoleRegistry};
pub use scheduler::{
    DateKey, DaySchedule, Exclusion, ExclusionCheck, ExclusionError, PickRule, RoundRobin,
    SchedError, Schedule, Scheduler, UsageWeighted,
};
