use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Role
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleId(String);

impl RoleId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rôle planifiable (ex. « Sound », « Lead »).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Plus la valeur est haute, plus le rôle est planifié tôt.
    #[serde(default)]
    pub layout_priority: i32,
    /// Nombre maximal de personnes sur ce rôle pour une même date.
    #[serde(default = "default_maximum_count")]
    pub maximum_count: u32,
}

fn default_maximum_count() -> u32 {
    1
}

impl Role {
    pub fn new<N: Into<String>>(name: N, layout_priority: i32, maximum_count: u32) -> Self {
        Self {
            id: RoleId::random(),
            name: name.into(),
            layout_priority,
            maximum_count,
        }
    }

    /// Capacité effective ; un maximum nul compte pour une place.
    pub fn capacity(&self) -> usize {
        self.maximum_count.max(1) as usize
    }
}

/// Identifiant fort pour Person
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unité de cadence d'une disponibilité.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Anytime,
    Days,
    Weeks,
}

/// Fréquence à laquelle une personne peut être planifiée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub period: u32,
    pub unit: Cadence,
}

impl Default for Availability {
    fn default() -> Self {
        Self::anytime()
    }
}

impl Availability {
    pub fn anytime() -> Self {
        Self {
            period: 1,
            unit: Cadence::Anytime,
        }
    }
    pub fn every_days(period: u32) -> Self {
        Self {
            period,
            unit: Cadence::Days,
        }
    }
    pub fn every_weeks(period: u32) -> Self {
        Self {
            period,
            unit: Cadence::Weeks,
        }
    }

    /// Une période nulle n'a de sens que pour `Anytime`.
    pub fn is_valid(&self) -> bool {
        self.unit == Cadence::Anytime || self.period > 0
    }

    /// Date à partir de laquelle la personne redevient disponible après `start`.
    ///
    /// Sature à `DateTime::<Utc>::MAX_UTC` au-delà de la plage représentable.
    pub fn end_date_from(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        let days = match self.unit {
            Cadence::Anytime => 1,
            Cadence::Days => i64::from(self.period),
            Cadence::Weeks => 7 * i64::from(self.period),
        };
        TimeDelta::try_days(days)
            .and_then(|delta| start.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Indisponibilité explicite (intervalle UTC [start, end)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unavailability {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Unavailability {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, String> {
        if end <= start {
            return Err("unavailability end must be after start".to_string());
        }
        Ok(Self { start, end })
    }

    /// Journée entière commençant à `day`.
    pub fn single_day(day: DateTime<Utc>) -> Self {
        Self {
            start: day,
            end: day
                .checked_add_signed(TimeDelta::days(1))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn covers(&self, date: DateTime<Utc>) -> bool {
        self.start <= date && date < self.end
    }
}

/// Rôle tenu par une personne, avec les rôles dépendants occupés d'office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role: RoleId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependents: Vec<RoleId>,
}

/// Personne assignable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<RoleAssignment>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable: Vec<Unavailability>,
}

impl Person {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: PersonId::random(),
            name: name.into(),
            roles: Vec::new(),
            availability: Availability::anytime(),
            unavailable: Vec::new(),
        }
    }

    pub fn with_role(self, role: &RoleId) -> Self {
        self.with_dependent_roles(role, &[])
    }

    pub fn with_dependent_roles(mut self, role: &RoleId, dependents: &[&RoleId]) -> Self {
        self.roles.push(RoleAssignment {
            role: role.clone(),
            dependents: dependents.iter().map(|r| (*r).clone()).collect(),
        });
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn unavailable_on(mut self, unavailability: Unavailability) -> Self {
        self.unavailable.push(unavailability);
        self
    }

    pub fn has_role(&self, role: &RoleId) -> bool {
        self.roles.iter().any(|a| &a.role == role)
    }

    pub fn is_unavailable_on(&self, date: DateTime<Utc>) -> Option<&Unavailability> {
        self.unavailable.iter().find(|u| u.covers(date))
    }

    /// Chaîne des rôles dépendants de `primary`, résolue transitivement.
    ///
    /// L'ordre de déclaration est conservé, sans doublon ni le rôle primaire lui-même.
    pub fn dependent_roles(&self, primary: &RoleId) -> Vec<RoleId> {
        let mut out: Vec<RoleId> = Vec::new();
        let mut pending: Vec<&RoleId> = vec![primary];
        while let Some(current) = pending.pop() {
            if current != primary {
                if out.contains(current) {
                    continue;
                }
                out.push(current.clone());
            }
            let Some(assignment) = self.roles.iter().find(|a| &a.role == current) else {
                continue;
            };
            // empilé à l'envers pour garder l'ordre de déclaration
            for dep in assignment.dependents.iter().rev() {
                if dep != primary && !out.contains(dep) {
                    pending.push(dep);
                }
            }
        }
        out
    }
}
