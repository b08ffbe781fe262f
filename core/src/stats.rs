//! Profile statistics derived from lists the profile screen already holds.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{HealthRecord, LostPet, LostPetStatus, Pet, Question, RecordKind};
use crate::validation::parse_date;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestWeight {
    pub pet_id: String,
    pub weight: f64,
    pub unit: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingVaccination {
    pub pet_id: String,
    pub title: String,
    pub due: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileStats {
    pub pet_count: usize,
    pub records_by_kind: BTreeMap<RecordKind, usize>,
    pub total_vet_cost: f64,
    pub latest_weights: Vec<LatestWeight>,
    /// Soonest first.
    pub upcoming_vaccinations: Vec<UpcomingVaccination>,
    pub questions_asked: usize,
    pub active_lost_reports: usize,
}

/// Inputs for `ProfileStats::compute`.
#[derive(Debug, Clone, Copy)]
pub struct ProfileData<'a> {
    pub user_id: &'a str,
    pub pets: &'a [Pet],
    pub records: &'a [HealthRecord],
    pub questions: &'a [Question],
    pub lost_reports: &'a [LostPet],
}

impl ProfileStats {
    /// `today` bounds the upcoming-vaccination window (inclusive).
    pub fn compute(data: ProfileData<'_>, today: NaiveDate) -> Self {
        let mut records_by_kind = BTreeMap::new();
        for record in data.records {
            *records_by_kind.entry(record.kind).or_insert(0) += 1;
        }

        let total_vet_cost: f64 = data
            .records
            .iter()
            .filter(|r| matches!(r.kind, RecordKind::Treatment | RecordKind::Appointment))
            .filter_map(|r| r.cost)
            .sum();

        let mut latest: BTreeMap<&str, (NaiveDate, &HealthRecord)> = BTreeMap::new();
        for record in data.records.iter().filter(|r| r.kind == RecordKind::Weight) {
            let (Some(date), Some(_)) = (parse_date(&record.date), record.weight) else {
                continue;
            };
            match latest.get(record.pet_id.as_str()) {
                Some((seen, _)) if *seen >= date => {}
                _ => {
                    latest.insert(record.pet_id.as_str(), (date, record));
                }
            }
        }
        let latest_weights = latest
            .into_values()
            .filter_map(|(_, r)| {
                Some(LatestWeight {
                    pet_id: r.pet_id.clone(),
                    weight: r.weight?,
                    unit: r.unit.clone().unwrap_or_default(),
                    date: r.date.clone(),
                })
            })
            .collect();

        let mut upcoming: Vec<(NaiveDate, UpcomingVaccination)> = data
            .records
            .iter()
            .filter(|r| r.kind == RecordKind::Vaccine)
            .filter_map(|r| {
                let due_raw = r.next_due_date.as_deref()?;
                let due = parse_date(due_raw)?;
                (due >= today).then(|| {
                    (
                        due,
                        UpcomingVaccination {
                            pet_id: r.pet_id.clone(),
                            title: r.title.clone(),
                            due: due_raw.to_string(),
                        },
                    )
                })
            })
            .collect();
        upcoming.sort_by_key(|(due, _)| *due);

        ProfileStats {
            pet_count: data.pets.len(),
            records_by_kind,
            total_vet_cost,
            latest_weights,
            upcoming_vaccinations: upcoming.into_iter().map(|(_, v)| v).collect(),
            questions_asked: data
                .questions
                .iter()
                .filter(|q| q.author_id == data.user_id)
                .count(),
            active_lost_reports: data
                .lost_reports
                .iter()
                .filter(|l| l.status == LostPetStatus::Lost)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::health::UNSPECIFIED;

    fn record(id: &str, pet: &str, kind: RecordKind) -> HealthRecord {
        HealthRecord {
            id: id.to_string(),
            pet_id: pet.to_string(),
            kind,
            title: kind.label().to_string(),
            description: String::new(),
            date: String::new(),
            veterinarian: UNSPECIFIED.to_string(),
            dosage: None,
            frequency: None,
            weight: None,
            unit: None,
            severity: None,
            symptoms: None,
            cost: None,
            next_due_date: None,
        }
    }

    fn weight(id: &str, pet: &str, kg: f64, date: &str) -> HealthRecord {
        HealthRecord {
            weight: Some(kg),
            unit: Some("kg".to_string()),
            date: date.to_string(),
            ..record(id, pet, RecordKind::Weight)
        }
    }

    #[test]
    fn stats_from_lists() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let records = vec![
            HealthRecord {
                cost: Some(200.0),
                ..record("t1", "p1", RecordKind::Treatment)
            },
            HealthRecord {
                cost: Some(150.5),
                ..record("ap1", "p1", RecordKind::Appointment)
            },
            HealthRecord {
                cost: Some(999.0),
                ..record("m1", "p1", RecordKind::Medication)
            },
            weight("w1", "p1", 10.0, "2024-01-01"),
            weight("w2", "p1", 11.5, "2024-05-01"),
            weight("w3", "p2", 4.0, "2024-03-03"),
            HealthRecord {
                next_due_date: Some("2024-09-01".to_string()),
                title: "Kuduz".to_string(),
                ..record("v1", "p1", RecordKind::Vaccine)
            },
            HealthRecord {
                next_due_date: Some("2024-06-01".to_string()),
                title: "Karma".to_string(),
                ..record("v2", "p2", RecordKind::Vaccine)
            },
            HealthRecord {
                next_due_date: Some("2024-01-01".to_string()),
                ..record("v3", "p2", RecordKind::Vaccine)
            },
        ];

        let stats = ProfileStats::compute(
            ProfileData {
                user_id: "u1",
                pets: &[],
                records: &records,
                questions: &[],
                lost_reports: &[],
            },
            today,
        );

        assert_eq!(stats.records_by_kind[&RecordKind::Weight], 3);
        assert_eq!(stats.records_by_kind[&RecordKind::Vaccine], 3);
        assert!((stats.total_vet_cost - 350.5).abs() < f64::EPSILON);
        assert_eq!(stats.latest_weights.len(), 2);
        assert_eq!(stats.latest_weights[0].weight, 11.5);
        let upcoming: Vec<&str> = stats
            .upcoming_vaccinations
            .iter()
            .map(|v| v.title.as_str())
            .collect();
        assert_eq!(upcoming, vec!["Karma", "Kuduz"]);
    }

    #[test]
    fn empty_inputs() {
        let stats = ProfileStats::compute(
            ProfileData {
                user_id: "u1",
                pets: &[],
                records: &[],
                questions: &[],
                lost_reports: &[],
            },
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert_eq!(stats, ProfileStats::default());
    }
}
