use crate::model::RoleId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExclusionError {
    #[error("exclusion for role {role} ends {days} day(s) before it starts")]
    NegativeDuration { role: String, days: i64 },
}

/// Zone d'exclusion : la personne ne peut pas reprendre `role` sur [start, end).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    role: RoleId,
}

impl Exclusion {
    pub fn new(
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        role: RoleId,
    ) -> Result<Self, ExclusionError> {
        let days = (end_date - start_date).num_days();
        if end_date < start_date {
            return Err(ExclusionError::NegativeDuration {
                role: role.as_str().to_string(),
                days: -days,
            });
        }
        Ok(Self {
            start_date,
            end_date,
            role,
        })
    }

    /// Fenêtre hypothétique ; une fin antérieure au début est ramenée au début.
    pub(super) fn clamped(start_date: DateTime<Utc>, end_date: DateTime<Utc>, role: RoleId) -> Self {
        Self {
            start_date,
            end_date: end_date.max(start_date),
            role,
        }
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }
    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }
    pub fn role(&self) -> &RoleId {
        &self.role
    }

    pub fn duration_in_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// `start <= date < end`
    pub fn includes_date(&self, date: DateTime<Utc>) -> bool {
        self.start_date <= date && date < self.end_date
    }

    /// Intersection semi-ouverte ; deux zones de même début se chevauchent toujours,
    /// y compris de durée nulle. Deux zones bout à bout ne se chevauchent pas.
    pub fn overlaps(&self, other: &Exclusion) -> bool {
        self.start_date == other.start_date
            || (self.start_date < other.end_date && other.start_date < self.end_date)
    }
}
