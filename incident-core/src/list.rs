use crate::model::{Incident, IncidentPatch};

/// The ordered records the console shows. Only mutated with what the
/// backend returned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IncidentList {
    items: Vec<Incident>,
}

impl IncidentList {
    pub fn new(items: Vec<Incident>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Incident] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, sys_id: &str) -> Option<&Incident> {
        self.items.iter().find(|i| i.sys_id == sys_id)
    }

    pub fn replace_all(&mut self, items: Vec<Incident>) {
        self.items = items;
    }

    pub fn apply_created(&mut self, incident: Incident) {
        self.items.insert(0, incident);
    }

    /// Merges the echo into the entry with `sys_id`. Returns the merged entry,
    /// or `None` when no such entry is held locally.
    pub fn apply_updated(&mut self, sys_id: &str, patch: IncidentPatch) -> Option<&Incident> {
        let entry = self.items.iter_mut().find(|i| i.sys_id == sys_id)?;
        entry.merge(patch);
        Some(entry)
    }

    pub fn apply_deleted(&mut self, sys_id: &str) -> bool {
        match self.items.iter().position(|i| i.sys_id == sys_id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }
}
