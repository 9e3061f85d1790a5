//! Doctor roster and the patient assignment rule.
//!
//! Patients are assigned round-robin by their sequence number:
//! patient `n` gets roster entry `n % roster.len()`. The roster keeps
//! doctors in template order, so the assignment does not depend on
//! storage insertion order.

use uuid::Uuid;

use crate::models::{Doctor, User};

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub template_index: usize,
    pub hospital_index: usize,
    pub user: User,
    pub doctor: Doctor,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorRoster {
    entries: Vec<RosterEntry>,
}

impl DoctorRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: RosterEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Doctor assigned to the patient with sequence number `patient_seq`.
    pub fn assign(&self, patient_seq: usize) -> Option<&RosterEntry> {
        round_robin_index(patient_seq, self.entries.len()).map(|i| &self.entries[i])
    }

    pub fn hospital_of(&self, doctor_id: &Uuid) -> Option<Uuid> {
        self.entries
            .iter()
            .find(|e| e.doctor.id == *doctor_id)
            .map(|e| e.doctor.hospital_id)
    }
}

pub fn round_robin_index(seq: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| seq % len)
}
