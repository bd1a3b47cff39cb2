mod assignment;
mod exclusion;
mod rules;
mod types;
mod util;

pub use exclusion::{Exclusion, ExclusionError};
pub use rules::{rule_by_name, PickContext, PickRule, RoundRobin, UsageWeighted};
pub use types::{DateKey, DaySchedule, ExclusionCheck, Placement, SchedError, Schedule};

use crate::export::{self, ScheduleRow};
use crate::input::ScheduleInput;
use crate::model::{Person, PersonId, RoleId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Scheduler : remplit les rôles d'une `ScheduleInput` date par date.
///
/// Une instance possède son état de travail ; deux planifications concurrentes
/// passent par deux instances.
#[derive(Debug)]
pub struct Scheduler {
    input: ScheduleInput,
    rule: Box<dyn PickRule>,
    schedule: Schedule,
    cursors: HashMap<RoleId, usize>,
    usage: HashMap<PersonId, u32>,
}

impl Scheduler {
    pub fn new(input: ScheduleInput) -> Self {
        Self {
            input,
            rule: Box::new(RoundRobin),
            schedule: Schedule::default(),
            cursors: HashMap::new(),
            usage: HashMap::new(),
        }
    }

    pub fn with_rule(mut self, rule: Box<dyn PickRule>) -> Self {
        self.rule = rule;
        self
    }

    pub fn input(&self) -> &ScheduleInput {
        &self.input
    }
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Repart de zéro puis remplit la grille. N'échoue que sur une disponibilité incohérente.
    pub fn create_schedule(&mut self) -> Result<(), SchedError> {
        assignment::create_schedule(self)
    }

    pub fn clear_working_state(&mut self) {
        self.schedule = Schedule::default();
        self.cursors.clear();
        self.usage.clear();
    }

    /// Enregistrement de la date (clé jour + heure), créé s'il manque.
    pub fn schedule_for_date(&mut self, date: DateTime<Utc>) -> &DaySchedule {
        self.schedule.day_mut(date)
    }

    pub fn has_exclusion_for(
        &self,
        date: DateTime<Utc>,
        person: &Person,
        role: &RoleId,
    ) -> ExclusionCheck {
        assignment::exclusion_check(&self.schedule, date, person, role)
    }

    pub fn json_fields(&self) -> Vec<String> {
        export::json_fields(self.input.roles())
    }

    pub fn json_result(&self) -> Vec<ScheduleRow> {
        export::json_result(&self.schedule, self.input.roles(), self.input.people())
    }
}
