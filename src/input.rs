use crate::registry::{PersonRegistry, RoleRegistry};
use chrono::{DateTime, Utc};
use thiserror::Error;

pub const DEFAULT_DAYS_PER_PERIOD: i64 = 7;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("no roles to schedule")]
    NoRoles,
    #[error("days_per_period must be >= 1 (got {0})")]
    InvalidPeriod(i64),
    #[error("start_date is missing")]
    MissingStartDate,
    #[error("end_date is missing")]
    MissingEndDate,
    #[error("invalid {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("end_date must be at least one day after start_date (got {days} day(s))")]
    NonPositiveDuration { days: i64 },
    #[error("availability of {person} needs a period >= 1")]
    InvalidAvailability { person: String },
}

/// Paramètres bruts d'une planification, tels que fournis par l'appelant.
#[derive(Debug, Clone)]
pub struct ScheduleParams {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub days_per_period: i64,
    pub roles: RoleRegistry,
    pub people: PersonRegistry,
    pub max_iterations: usize,
}

impl Default for ScheduleParams {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            days_per_period: DEFAULT_DAYS_PER_PERIOD,
            roles: RoleRegistry::default(),
            people: PersonRegistry::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ScheduleParams {
    pub fn validate(self) -> Result<ScheduleInput, InputError> {
        ScheduleInput::validate(self)
    }
}

/// Entrée validée du moteur : plage de dates, pas, registres.
///
/// Les registres sont des instantanés possédés ; une exécution ne les modifie jamais.
#[derive(Debug, Clone)]
pub struct ScheduleInput {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    days_per_period: i64,
    roles: RoleRegistry,
    people: PersonRegistry,
    max_iterations: usize,
}

impl ScheduleInput {
    /// Raccourci avec une période hebdomadaire.
    pub fn new(
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        roles: RoleRegistry,
        people: PersonRegistry,
    ) -> Result<Self, InputError> {
        Self::validate(ScheduleParams {
            start_date: Some(start_date),
            end_date: Some(end_date),
            roles,
            people,
            ..ScheduleParams::default()
        })
    }

    pub fn validate(params: ScheduleParams) -> Result<Self, InputError> {
        if params.roles.in_layout_order().is_empty() {
            return Err(InputError::NoRoles);
        }
        if params.days_per_period < 1 {
            return Err(InputError::InvalidPeriod(params.days_per_period));
        }
        let start_date = params.start_date.ok_or(InputError::MissingStartDate)?;
        let end_date = params.end_date.ok_or(InputError::MissingEndDate)?;
        let days = (end_date - start_date).num_days();
        if days <= 0 {
            return Err(InputError::NonPositiveDuration { days });
        }
        if let Some(person) = params.people.iter().find(|p| !p.availability.is_valid()) {
            return Err(InputError::InvalidAvailability {
                person: person.name.clone(),
            });
        }
        Ok(Self {
            start_date,
            end_date,
            days_per_period: params.days_per_period,
            roles: params.roles,
            people: params.people,
            max_iterations: params.max_iterations,
        })
    }

    pub fn with_days_per_period(mut self, days: i64) -> Result<Self, InputError> {
        if days < 1 {
            return Err(InputError::InvalidPeriod(days));
        }
        self.days_per_period = days;
        Ok(self)
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }
    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }
    pub fn days_per_period(&self) -> i64 {
        self.days_per_period
    }
    pub fn duration_in_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }
    pub fn people(&self) -> &PersonRegistry {
        &self.people
    }
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}
