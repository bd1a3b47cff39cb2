use super::exclusion::Exclusion;
use super::rules::PickContext;
use super::types::{ExclusionCheck, Placement, SchedError, Schedule};
use super::{util, Scheduler};
use crate::model::{Person, PersonId, Role, RoleId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub(super) fn create_schedule(scheduler: &mut Scheduler) -> Result<(), SchedError> {
    scheduler.clear_working_state();

    let Scheduler {
        input,
        rule,
        schedule,
        cursors,
        usage,
    } = scheduler;
    let input = &*input;

    let end = input.end_date();
    let step = input.days_per_period();
    let mut iterations = 0usize;
    let mut placed = 0usize;

    'groups: for (priority, roles) in input.roles().priority_groups() {
        let mut date = input.start_date();
        while date < end {
            iterations += 1;
            if iterations > input.max_iterations() {
                warn!(
                    max_iterations = input.max_iterations(),
                    priority, "iteration cap reached, schedule truncated"
                );
                schedule.truncated = true;
                break 'groups;
            }

            schedule.day_mut(date);
            for role in &roles {
                let candidates = input.people().eligible_for(&role.id);
                if candidates.is_empty() {
                    continue;
                }
                let capacity = role.capacity();
                if schedule.day_mut(date).occupancy_count(&role.id) >= capacity {
                    continue;
                }

                let order = rule.candidate_order(&PickContext {
                    role: &role.id,
                    date,
                    candidates: &candidates,
                    cursor: cursors.get(&role.id).copied().unwrap_or(0),
                    usage,
                });

                for index in order {
                    let Some(&person) = candidates.get(index) else {
                        debug!(index, rule = rule.name(), "rule returned an unknown candidate");
                        continue;
                    };
                    if schedule.day_mut(date).is_occupying(&role.id, &person.id) {
                        continue;
                    }
                    let check = exclusion_check(schedule, date, person, &role.id);
                    if check.is_excluded() {
                        debug!(person = %person.name, role = %role.name, %date, reason = %check, "skipped");
                        if let ExclusionCheck::Unavailable { from, until } = check {
                            consume_turn(schedule, date, (from, until), person, &role.id);
                        }
                        continue;
                    }

                    place(schedule, usage, date, person, role)?;
                    cursors.insert(role.id.clone(), (index + 1) % candidates.len());
                    placed += 1;

                    if schedule.day_mut(date).occupancy_count(&role.id) >= capacity {
                        break;
                    }
                }
            }

            match util::add_days(date, step) {
                Some(next) => date = next,
                None => break,
            }
        }
    }

    info!(
        placed,
        dates = schedule.len(),
        rule = rule.name(),
        "schedule created"
    );
    Ok(())
}

/// Place `person` sur `role` à `date` et ouvre ses zones d'exclusion (rôle + dépendants).
fn place(
    schedule: &mut Schedule,
    usage: &mut HashMap<PersonId, u32>,
    date: DateTime<Utc>,
    person: &Person,
    role: &Role,
) -> Result<(), SchedError> {
    let until = cadence_end(person, date);
    let mut zones = vec![Exclusion::new(date, until, role.id.clone())?];
    for dependent in person.dependent_roles(&role.id) {
        zones.push(Exclusion::new(date, until, dependent)?);
    }
    schedule
        .exclusion_zones
        .entry(person.id.clone())
        .or_default()
        .extend(zones);

    let count = usage.entry(person.id.clone()).or_insert(0);
    *count += 1;
    schedule.day_mut(date).place(
        &role.id,
        Placement {
            person: person.id.clone(),
            score: *count,
        },
    );
    debug!(person = %person.name, role = %role.name, %date, "placed");
    Ok(())
}

/// Une indisponibilité qui tombe sur une date échantillonnée compte comme un tour :
/// la cadence de `role` repart de la première date manquée de cette indisponibilité.
fn consume_turn(
    schedule: &mut Schedule,
    date: DateTime<Utc>,
    (from, until): (DateTime<Utc>, DateTime<Utc>),
    person: &Person,
    role: &RoleId,
) {
    let zones = schedule.exclusion_zones.entry(person.id.clone()).or_default();
    let already_counted = zones
        .iter()
        .any(|z| z.role() == role && from <= z.start_date() && z.start_date() < until);
    if already_counted {
        return;
    }
    let end = cadence_end(person, date).max(until);
    zones.push(Exclusion::clamped(date, end, role.clone()));
}

/// Fin (exclusive) de la zone ouverte par un placement à `date`.
fn cadence_end(person: &Person, date: DateTime<Utc>) -> DateTime<Utc> {
    util::add_days(person.availability.end_date_from(date), -1)
        .map_or(date, |end| end.max(date))
}

pub(super) fn exclusion_check(
    schedule: &Schedule,
    date: DateTime<Utc>,
    person: &Person,
    role: &RoleId,
) -> ExclusionCheck {
    if let Some(u) = person.is_unavailable_on(date) {
        return ExclusionCheck::Unavailable {
            from: u.start,
            until: u.end,
        };
    }

    let window = Exclusion::clamped(date, cadence_end(person, date), role.clone());
    schedule
        .exclusions_for(&person.id)
        .iter()
        .filter(|zone| zone.role() == role)
        .find(|zone| zone.overlaps(&window))
        .map_or(ExclusionCheck::Free, |zone| ExclusionCheck::Overlapping {
            role: zone.role().clone(),
            from: zone.start_date(),
            until: zone.end_date(),
        })
}
