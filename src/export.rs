//! Projection en lignes de la grille (date × rôle → personnes) pour les exports.

use crate::model::PersonId;
use crate::registry::{PersonRegistry, RoleRegistry};
use crate::scheduler::Schedule;
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PersonView {
    pub id: PersonId,
    pub name: String,
}

/// Une ligne : la date, sa clé jour + heure, puis une colonne par rôle (ordre de priorité).
#[derive(Debug, Clone)]
pub struct ScheduleRow {
    pub date: DateTime<Utc>,
    pub date_key: String,
    pub columns: Vec<(String, Vec<PersonView>)>,
}

impl ScheduleRow {
    pub fn people(&self, role_name: &str) -> Option<&[PersonView]> {
        self.columns
            .iter()
            .find(|(name, _)| name == role_name)
            .map(|(_, people)| people.as_slice())
    }

    pub fn names(&self, role_name: &str) -> Vec<&str> {
        self.people(role_name)
            .unwrap_or(&[])
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }
}

impl Serialize for ScheduleRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 2))?;
        map.serialize_entry("date", &self.date)?;
        map.serialize_entry("date_key", &self.date_key)?;
        for (name, people) in &self.columns {
            map.serialize_entry(name, people)?;
        }
        map.end()
    }
}

/// `["date", rôle1, rôle2, ...]`, rôles par priorité décroissante.
pub fn json_fields(roles: &RoleRegistry) -> Vec<String> {
    std::iter::once("date".to_string())
        .chain(roles.in_layout_order().into_iter().map(|r| r.name.clone()))
        .collect()
}

pub fn json_result(
    schedule: &Schedule,
    roles: &RoleRegistry,
    people: &PersonRegistry,
) -> Vec<ScheduleRow> {
    let layout = roles.in_layout_order();
    schedule
        .dates()
        .map(|day| ScheduleRow {
            date: day.date(),
            date_key: day.key().to_string(),
            columns: layout
                .iter()
                .map(|role| {
                    let assigned = day
                        .occupants(&role.id)
                        .iter()
                        .filter_map(|p| people.find_by_id(&p.person))
                        .map(|person| PersonView {
                            id: person.id.clone(),
                            name: person.name.clone(),
                        })
                        .collect();
                    (role.name.clone(), assigned)
                })
                .collect(),
        })
        .collect()
}
