use crate::model::{Person, PersonId, Role, RoleId};
use serde::{Deserialize, Serialize};

/// Registre des rôles, dans leur ordre d'enregistrement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRegistry {
    roles: Vec<Role>,
}

impl RoleRegistry {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    pub fn add(&mut self, role: Role) -> RoleId {
        let id = role.id.clone();
        self.roles.push(role);
        id
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn find_by_id(&self, id: &RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| &r.id == id)
    }
    pub fn find_by_name(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Rôles triés par priorité décroissante (tri stable : l'ordre d'enregistrement départage).
    pub fn in_layout_order(&self) -> Vec<&Role> {
        let mut out: Vec<&Role> = self.roles.iter().collect();
        out.sort_by(|a, b| b.layout_priority.cmp(&a.layout_priority));
        out
    }

    /// Rôles regroupés par niveau de priorité, le plus prioritaire d'abord.
    pub fn priority_groups(&self) -> Vec<(i32, Vec<&Role>)> {
        let mut groups: Vec<(i32, Vec<&Role>)> = Vec::new();
        for role in self.in_layout_order() {
            match groups.last_mut() {
                Some((priority, members)) if *priority == role.layout_priority => {
                    members.push(role)
                }
                _ => groups.push((role.layout_priority, vec![role])),
            }
        }
        groups
    }
}

/// Registre des personnes assignables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonRegistry {
    people: Vec<Person>,
}

impl PersonRegistry {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    pub fn add(&mut self, person: Person) -> PersonId {
        let id = person.id.clone();
        self.people.push(person);
        id
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    pub fn find_by_id(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| &p.id == id)
    }
    pub fn find_by_name(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name == name)
    }

    /// Personnes déclarant `role` parmi leurs rôles primaires, dans l'ordre du registre.
    pub fn eligible_for(&self, role: &RoleId) -> Vec<&Person> {
        self.people.iter().filter(|p| p.has_role(role)).collect()
    }
}
