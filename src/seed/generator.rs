//! Demo population.
//!
//! Strictly sequential: every write completes before the next starts,
//! because later records reference identifiers of earlier ones
//! (hospital → doctor → prescription, slot → reminder).
//!
//! Only the hospital batch is atomic by default. With
//! `SeedOptions::atomic_patients` each patient chain and each
//! appointment/reminder pair is committed as one transaction as well.
//! Otherwise a failure leaves earlier writes in place (at-least-attempted,
//! not exactly-once).

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::derive::{derive_appointment_reminder, derive_medicine_chain, scheduled_appointment, SlotPolicy};
use super::guard::should_populate;
use super::roster::{DoctorRoster, RosterEntry};
use super::templates::{DoctorTemplate, HospitalTemplate, SeedPlan};
use super::SeedError;
use crate::config;
use crate::crypto::PasswordHasher;
use crate::db::{Record, Store};
use crate::models::enums::*;
use crate::models::*;

/// Knobs for one population run.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Generation instant; every derived timestamp is relative to it.
    pub now: DateTime<Utc>,
    pub patient_count: usize,
    pub atomic_patients: bool,
    pub slot_policy: SlotPolicy,
    pub password: String,
    pub hash_cost: u32,
}

impl SeedOptions {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            patient_count: config::DEFAULT_PATIENT_COUNT,
            atomic_patients: false,
            slot_policy: SlotPolicy::default(),
            password: config::DEMO_PASSWORD.into(),
            hash_cost: config::DEMO_HASH_COST,
        }
    }
}

/// Count of created rows per entity.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub hospitals: usize,
    pub users: usize,
    pub doctors: usize,
    pub patients: usize,
    pub health_summaries: usize,
    pub health_records: usize,
    pub prescriptions: usize,
    pub medicines: usize,
    pub schedules: usize,
    pub slots: usize,
    pub reminders: usize,
    pub appointments: usize,
}

impl SeedReport {
    fn record(&mut self, record: &Record) {
        match record {
            Record::Hospital(_) => self.hospitals += 1,
            Record::User { .. } => self.users += 1,
            Record::Doctor(_) => self.doctors += 1,
            Record::Patient(_) => self.patients += 1,
            Record::HealthSummary(_) => self.health_summaries += 1,
            Record::HealthRecord(_) => self.health_records += 1,
            Record::Prescription { medicines, .. } => {
                self.prescriptions += 1;
                self.medicines += medicines.len();
            }
            Record::MedicineSchedule(_) => self.schedules += 1,
            Record::ScheduleSlot(_) => self.slots += 1,
            Record::Reminder(_) => self.reminders += 1,
            Record::Appointment(_) => self.appointments += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Demo data was already present; nothing written.
    Skipped,
    Populated(SeedReport),
}

/// A generated patient and its backing user.
#[derive(Debug, Clone)]
pub struct SeededPatient {
    pub index: usize,
    pub user: User,
    pub patient: Patient,
}

pub struct Populator<'a, S: Store, H: PasswordHasher> {
    store: &'a mut S,
    hasher: &'a H,
    options: SeedOptions,
    report: SeedReport,
}

impl<'a, S: Store, H: PasswordHasher> Populator<'a, S, H> {
    pub fn new(store: &'a mut S, hasher: &'a H, options: SeedOptions) -> Self {
        Self {
            store,
            hasher,
            options,
            report: SeedReport::default(),
        }
    }

    /// Populate the store from `plan` unless demo data already exists.
    pub fn populate(mut self, plan: &SeedPlan) -> Result<SeedOutcome, SeedError> {
        if !should_populate(&*self.store)? {
            return Ok(SeedOutcome::Skipped);
        }
        plan.validate()?;

        tracing::info!(
            hospitals = plan.hospitals.len(),
            doctors = plan.doctors.len(),
            patients = self.options.patient_count,
            atomic_patients = self.options.atomic_patients,
            "Seeding demo data"
        );

        let hospitals = self.create_hospitals(&plan.hospitals)?;
        let roster = self.create_doctors(&plan.doctors, &hospitals)?;

        let mut patients = Vec::with_capacity(self.options.patient_count);
        for index in 0..self.options.patient_count {
            let doctor = assigned(&roster, index)?;
            patients.push(self.create_patient(index, plan.patient_name(index), doctor)?);
        }

        for seeded in &patients {
            let doctor = assigned(&roster, seeded.index)?;
            self.create_appointment(seeded, doctor)?;
        }

        tracing::info!(report = ?self.report, "Demo dataset seeded successfully");
        Ok(SeedOutcome::Populated(self.report))
    }

    /// All hospitals in one transaction.
    fn create_hospitals(&mut self, templates: &[HospitalTemplate]) -> Result<Vec<Hospital>, SeedError> {
        let batch = templates
            .iter()
            .map(|t| {
                Record::Hospital(Hospital {
                    id: Uuid::new_v4(),
                    name: t.name.clone(),
                    address: t.address.clone(),
                    latitude: t.latitude,
                    longitude: t.longitude,
                    is_demo: true,
                    created_at: self.options.now,
                })
            })
            .collect();

        let written = self.store.run_atomic(batch)?;
        let mut hospitals = Vec::with_capacity(written.len());
        for record in written {
            self.report.record(&record);
            if let Record::Hospital(h) = record {
                hospitals.push(h);
            }
        }
        tracing::debug!(count = hospitals.len(), "Hospitals created");
        Ok(hospitals)
    }

    /// One user + doctor per template, in template order.
    fn create_doctors(
        &mut self,
        templates: &[DoctorTemplate],
        hospitals: &[Hospital],
    ) -> Result<DoctorRoster, SeedError> {
        let mut roster = DoctorRoster::new();

        for (i, template) in templates.iter().enumerate() {
            let hospital = hospitals.get(template.hospital_index).ok_or_else(|| {
                SeedError::InvalidTemplate(format!(
                    "doctor template {i} references missing hospital {}",
                    template.hospital_index
                ))
            })?;

            let gender = if i % 2 == 0 { Gender::Female } else { Gender::Male };
            let (user, profile) = self.new_user(
                UserRole::Doctor,
                &demo_email("doctor", i),
                &template.name,
                35 + i as u32,
                gender,
            )?;
            let (user, _) = self.store.create_user(user, profile)?;
            self.report.users += 1;

            let doctor = self.store.create_doctor(Doctor {
                id: Uuid::new_v4(),
                user_id: user.id,
                hospital_id: hospital.id,
                specialization: template.specialization.clone(),
                experience_years: template.experience_years,
                license_number: format!("DEMO-LIC-{}", i + 1),
            })?;
            self.report.doctors += 1;

            tracing::debug!(doctor_id = %doctor.id, name = %template.name, "Doctor created");
            roster.push(RosterEntry {
                template_index: i,
                hospital_index: template.hospital_index,
                user,
                doctor,
            });
        }

        Ok(roster)
    }

    /// User, patient, health summary, health record, prescription with two
    /// medicines, and one schedule/slot/reminder chain per medicine.
    fn create_patient(
        &mut self,
        index: usize,
        name: &str,
        doctor: &RosterEntry,
    ) -> Result<SeededPatient, SeedError> {
        let now = self.options.now;
        let gender = if index % 2 == 0 { Gender::Male } else { Gender::Female };
        let (user, profile) = self.new_user(
            UserRole::Patient,
            &demo_email("patient", index),
            name,
            27 + index as u32,
            gender,
        )?;
        let patient = Patient { id: Uuid::new_v4(), user_id: user.id };

        let summary = HealthSummary {
            id: Uuid::new_v4(),
            patient_id: patient.id,
            blood_group: BloodGroup::for_index(index),
            height_cm: 160.0 + index as f64,
            weight_kg: 52.0 + index as f64,
            notes: Some(format!("Demo Health Summary - {}", index + 1)),
        };

        let health_record = HealthRecord {
            id: Uuid::new_v4(),
            patient_id: patient.id,
            created_by_user_id: doctor.user.id,
            record_type: HealthRecordType::for_index(index),
            title: "Initial Consultation".into(),
            description: Some("Routine demo consultation".into()),
            created_at: now,
        };

        let prescription = Prescription {
            id: Uuid::new_v4(),
            patient_id: patient.id,
            doctor_id: doctor.doctor.id,
            notes: Some("Demo Prescription".into()),
            created_at: now,
        };
        let medicines: Vec<Medicine> = [("A", "1 pill"), ("B", "2 pills")]
            .into_iter()
            .map(|(series, dosage)| Medicine {
                id: Uuid::new_v4(),
                prescription_id: prescription.id,
                name: format!("Medicine {series}{}", index + 1),
                dosage: dosage.into(),
                is_active: true,
                created_at: now,
            })
            .collect();

        let mut chains = Vec::with_capacity(medicines.len());
        for medicine in &medicines {
            chains.push(derive_medicine_chain(
                medicine,
                &patient,
                index,
                self.options.slot_policy,
                now,
            )?);
        }

        let mut records = vec![
            Record::User { user: user.clone(), profile },
            Record::Patient(patient.clone()),
            Record::HealthSummary(summary),
            Record::HealthRecord(health_record),
            Record::Prescription { prescription, medicines },
        ];
        for chain in chains {
            records.extend(chain.into_records());
        }

        self.commit(records)?;
        tracing::debug!(index, patient_id = %patient.id, doctor = doctor.template_index, "Patient created");

        Ok(SeededPatient { index, user, patient })
    }

    fn create_appointment(&mut self, seeded: &SeededPatient, doctor: &RosterEntry) -> Result<(), SeedError> {
        let now = self.options.now;
        let appointment = scheduled_appointment(&seeded.patient, &doctor.doctor, seeded.index, now);
        let reminder = derive_appointment_reminder(&appointment, seeded.user.id, now);
        self.commit(vec![Record::Appointment(appointment), Record::Reminder(reminder)])
    }

    /// Write `records` in order, as one transaction when patient chains are atomic.
    fn commit(&mut self, records: Vec<Record>) -> Result<(), SeedError> {
        if self.options.atomic_patients {
            for record in self.store.run_atomic(records)? {
                self.report.record(&record);
            }
        } else {
            for record in records {
                self.store.insert(&record)?;
                self.report.record(&record);
            }
        }
        Ok(())
    }

    fn new_user(
        &self,
        role: UserRole,
        email: &str,
        name: &str,
        age: u32,
        gender: Gender,
    ) -> Result<(User, Profile), SeedError> {
        let user = User {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: self.hasher.hash(&self.options.password, self.options.hash_cost)?,
            role,
            is_demo: true,
            created_at: self.options.now,
        };
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id: user.id,
            name: name.into(),
            age,
            gender,
        };
        Ok((user, profile))
    }
}

fn assigned(roster: &DoctorRoster, index: usize) -> Result<&RosterEntry, SeedError> {
    roster
        .assign(index)
        .ok_or_else(|| SeedError::InvalidTemplate("doctor roster is empty".into()))
}

/// `demo.<role><n>@<domain>`, numbered from one.
pub fn demo_email(role: &str, index: usize) -> String {
    format!("demo.{role}{}@{}", index + 1, config::DEMO_EMAIL_DOMAIN)
}
