//! Règles de choix des candidats pour un créneau.
//!
//! Une règle ne fait qu'ordonner les candidats éligibles ; le moteur garde la main sur
//! les exclusions, la double réservation et la capacité du rôle.

use crate::model::{Person, PersonId, RoleId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// État visible par une règle au moment de remplir `role` à `date`.
pub struct PickContext<'a> {
    pub role: &'a RoleId,
    pub date: DateTime<Utc>,
    /// Candidats dans l'ordre du registre.
    pub candidates: &'a [&'a Person],
    /// Index du prochain candidat en rotation pour ce rôle.
    pub cursor: usize,
    /// Nombre de placements déjà faits par personne dans l'exécution.
    pub usage: &'a HashMap<PersonId, u32>,
}

impl PickContext<'_> {
    fn rotation(&self) -> Vec<usize> {
        let n = self.candidates.len();
        (0..n).map(|i| (self.cursor + i) % n).collect()
    }

    fn usage_of(&self, index: usize) -> u32 {
        self.usage
            .get(&self.candidates[index].id)
            .copied()
            .unwrap_or(0)
    }
}

pub trait PickRule: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Indices de `ctx.candidates` à essayer, chacun au plus une fois.
    fn candidate_order(&self, ctx: &PickContext<'_>) -> Vec<usize>;
}

/// Rotation simple à partir du curseur du rôle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin;

impl PickRule for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn candidate_order(&self, ctx: &PickContext<'_>) -> Vec<usize> {
        ctx.rotation()
    }
}

/// Les moins sollicités d'abord ; la rotation départage.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageWeighted;

impl PickRule for UsageWeighted {
    fn name(&self) -> &'static str {
        "usage-weighted"
    }

    fn candidate_order(&self, ctx: &PickContext<'_>) -> Vec<usize> {
        let mut order = ctx.rotation();
        order.sort_by_key(|&i| ctx.usage_of(i));
        order
    }
}

/// Résout une règle depuis son nom (`round-robin`, `usage-weighted`).
pub fn rule_by_name(name: &str) -> Option<Box<dyn PickRule>> {
    match name {
        "round-robin" => Some(Box::new(RoundRobin)),
        "usage-weighted" => Some(Box::new(UsageWeighted)),
        _ => None,
    }
}
