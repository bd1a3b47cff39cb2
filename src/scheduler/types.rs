use super::exclusion::{Exclusion, ExclusionError};
use crate::model::{PersonId, RoleId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedError {
    #[error(transparent)]
    Exclusion(#[from] ExclusionError),
}

/// Résultat de `has_exclusion_for` : libre, ou la raison de l'exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionCheck {
    Free,
    Unavailable {
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    },
    Overlapping {
        role: RoleId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    },
}

impl ExclusionCheck {
    pub fn is_excluded(&self) -> bool {
        !matches!(self, ExclusionCheck::Free)
    }
}

impl fmt::Display for ExclusionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionCheck::Free => write!(f, "available"),
            ExclusionCheck::Unavailable { from, until } => write!(
                f,
                "unavailable from {} until {}",
                from.to_rfc3339(),
                until.to_rfc3339()
            ),
            ExclusionCheck::Overlapping { role, from, until } => write!(
                f,
                "excluded from role {} between {} and {}",
                role.as_str(),
                from.to_rfc3339(),
                until.to_rfc3339()
            ),
        }
    }
}

/// Clé jour + heure d'une date échantillonnée (`YYYY/M/D@H`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}@{}", self.year, self.month, self.day, self.hour)
    }
}

/// Personne placée sur un rôle ; `score` est son rang de placement dans l'exécution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub person: PersonId,
    pub score: u32,
}

/// Occupation des rôles pour une date.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    date: DateTime<Utc>,
    key: DateKey,
    occupancy: HashMap<RoleId, Vec<Placement>>,
}

impl DaySchedule {
    pub(super) fn new(date: DateTime<Utc>, key: DateKey) -> Self {
        Self {
            date,
            key,
            occupancy: HashMap::new(),
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
    pub fn key(&self) -> DateKey {
        self.key
    }

    pub fn occupants(&self, role: &RoleId) -> &[Placement] {
        self.occupancy.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn occupancy_count(&self, role: &RoleId) -> usize {
        self.occupants(role).len()
    }

    pub fn is_occupying(&self, role: &RoleId, person: &PersonId) -> bool {
        self.occupants(role).iter().any(|p| &p.person == person)
    }

    pub(super) fn place(&mut self, role: &RoleId, placement: Placement) {
        self.occupancy.entry(role.clone()).or_default().push(placement);
    }
}

/// Grille produite par une exécution : dates → occupation, personnes → zones d'exclusion.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub(super) dates: BTreeMap<DateKey, DaySchedule>,
    pub(super) exclusion_zones: HashMap<PersonId, Vec<Exclusion>>,
    pub(super) truncated: bool,
}

impl Schedule {
    /// Enregistrement de `date`, créé s'il manque.
    pub(super) fn day_mut(&mut self, date: DateTime<Utc>) -> &mut DaySchedule {
        let key = super::util::day_and_hour_for_date(date);
        self.dates
            .entry(key)
            .or_insert_with(|| DaySchedule::new(date, key))
    }

    pub fn dates(&self) -> impl Iterator<Item = &DaySchedule> {
        self.dates.values()
    }
    pub fn len(&self) -> usize {
        self.dates.len()
    }
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
    pub fn get(&self, key: &DateKey) -> Option<&DaySchedule> {
        self.dates.get(key)
    }

    pub fn exclusion_zones(&self) -> &HashMap<PersonId, Vec<Exclusion>> {
        &self.exclusion_zones
    }
    pub fn exclusions_for(&self, person: &PersonId) -> &[Exclusion] {
        self.exclusion_zones
            .get(person)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Vrai si le plafond d'itérations a interrompu l'exécution.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}
