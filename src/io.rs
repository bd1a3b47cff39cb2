use crate::input::{
    InputError, ScheduleInput, ScheduleParams, DEFAULT_DAYS_PER_PERIOD, DEFAULT_MAX_ITERATIONS,
};
use crate::model::{Availability, Person, Role, RoleAssignment, Unavailability};
use crate::registry::{PersonRegistry, RoleRegistry};
use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Fichier de configuration d'une planification (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotaConfig {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "default_days_per_period")]
    pub days_per_period: i64,
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub roles: Vec<RoleConfig>,
    #[serde(default)]
    pub people: Vec<PersonConfig>,
}

/// Colonnes toujours présentes dans une ligne d'export.
const RESERVED_COLUMNS: [&str; 2] = ["date", "date_key"];

fn default_days_per_period() -> i64 {
    DEFAULT_DAYS_PER_PERIOD
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    pub name: String,
    #[serde(default)]
    pub layout_priority: i32,
    #[serde(default = "one")]
    pub maximum_count: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonConfig {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<PersonRoleConfig>,
    #[serde(default)]
    pub availability: Availability,
    /// `YYYY-MM-DD`, RFC3339, ou intervalle `a/b` / `a..b` (fin incluse si date seule).
    #[serde(default)]
    pub unavailable: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRoleConfig {
    pub role: String,
    #[serde(default)]
    pub dependents: Vec<String>,
}

impl RotaConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let config: RotaConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Paramètres bruts ; les dates mal formées remontent en `InputError::InvalidDate`.
    pub fn to_params(&self) -> anyhow::Result<ScheduleParams> {
        let mut roles = RoleRegistry::default();
        for rc in &self.roles {
            if rc.name.trim().is_empty() {
                bail!("role name cannot be empty");
            }
            if RESERVED_COLUMNS.contains(&rc.name.as_str()) {
                bail!("role name {} is reserved for the export columns", rc.name);
            }
            if roles.find_by_name(&rc.name).is_some() {
                bail!("duplicate role name: {}", rc.name);
            }
            roles.add(Role::new(rc.name.clone(), rc.layout_priority, rc.maximum_count));
        }

        let mut people = PersonRegistry::default();
        for pc in &self.people {
            let mut person = Person::new(pc.name.clone()).with_availability(pc.availability);
            for prc in &pc.roles {
                let role = resolve_role(&roles, &prc.role, &pc.name)?;
                let dependents = prc
                    .dependents
                    .iter()
                    .map(|d| resolve_role(&roles, d, &pc.name))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                person.roles.push(RoleAssignment { role, dependents });
            }
            for raw in &pc.unavailable {
                let u = parse_unavailability(raw.trim())
                    .with_context(|| format!("invalid unavailable value for {}", pc.name))?;
                person.unavailable.push(u);
            }
            people.add(person);
        }

        Ok(ScheduleParams {
            start_date: parse_optional(self.start_date.as_deref(), "start_date")?,
            end_date: parse_optional(self.end_date.as_deref(), "end_date")?,
            days_per_period: self.days_per_period,
            roles,
            people,
            max_iterations: self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
        })
    }

    pub fn to_input(&self) -> anyhow::Result<ScheduleInput> {
        Ok(self.to_params()?.validate()?)
    }
}

fn resolve_role(
    roles: &RoleRegistry,
    name: &str,
    person: &str,
) -> anyhow::Result<crate::model::RoleId> {
    roles
        .find_by_name(name)
        .map(|r| r.id.clone())
        .with_context(|| format!("unknown role {name} for {person}"))
}

fn parse_optional(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, InputError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_point(value)
            .map(|(dt, _)| Some(dt))
            .map_err(|_| InputError::InvalidDate {
                field,
                value: value.to_string(),
            }),
    }
}

fn parse_unavailability(chunk: &str) -> anyhow::Result<Unavailability> {
    if let Some((start_raw, end_raw)) = chunk.split_once('/').or_else(|| chunk.split_once("..")) {
        let (start, _) = parse_point(start_raw.trim())?;
        let (mut end, end_was_date) = parse_point(end_raw.trim())?;
        if end_was_date {
            end = end
                .checked_add_signed(TimeDelta::days(1))
                .context("unavailability end out of range")?;
        }
        Unavailability::new(start, end).map_err(anyhow::Error::msg)
    } else {
        let (start, _) = parse_point(chunk)?;
        Ok(Unavailability::single_day(start))
    }
}

/// RFC3339, ou `YYYY-MM-DD` à minuit UTC (le booléen l'indique).
pub fn parse_point(raw: &str) -> anyhow::Result<(DateTime<Utc>, bool)> {
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Ok((dt, false));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date/datetime: {raw}"))?;
    let datetime = date
        .and_hms_opt(0, 0, 0)
        .context("invalid midnight conversion")?;
    Ok((Utc.from_utc_datetime(&datetime), true))
}

/// Écriture JSON atomique (fichier temporaire puis renommage).
pub fn write_json_atomic<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(value)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
