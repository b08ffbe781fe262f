//! Recommendation feed over adoption listings and lost-pet reports.
//!
//! The host fetches both lists concurrently; `build_feed` merges whatever
//! came back. A failed side simply contributes nothing (reads are
//! empty-on-error).

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::types::{AdoptionListing, AdoptionStatus, LostPet, LostPetStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "item", rename_all = "snake_case")]
pub enum FeedItem {
    Adoption(AdoptionListing),
    LostPet(LostPet),
}

impl FeedItem {
    pub fn species(&self) -> &str {
        match self {
            FeedItem::Adoption(a) => &a.species,
            FeedItem::LostPet(l) => &l.species,
        }
    }

    pub fn created_at(&self) -> &str {
        match self {
            FeedItem::Adoption(a) => &a.created_at,
            FeedItem::LostPet(l) => &l.created_at,
        }
    }
}

/// Sort key from an RFC 3339 timestamp or a bare date; unparseable sorts last.
fn timestamp(raw: &str) -> i64 {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp();
    }
    crate::validation::parse_date(raw)
        .or_else(|| raw.get(..10).and_then(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(i64::MIN)
}

/// Newest first. Closed items (adopted, found) are left out; `species`
/// filters case-insensitively when given.
pub fn build_feed(
    adoptions: Vec<AdoptionListing>,
    lost: Vec<LostPet>,
    species: Option<&str>,
) -> Vec<FeedItem> {
    let wanted = species
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut items: Vec<FeedItem> = adoptions
        .into_iter()
        .filter(|a| a.status == AdoptionStatus::Available)
        .map(FeedItem::Adoption)
        .chain(
            lost.into_iter()
                .filter(|l| l.status == LostPetStatus::Lost)
                .map(FeedItem::LostPet),
        )
        .filter(|item| match &wanted {
            Some(w) => item.species().to_lowercase() == *w,
            None => true,
        })
        .collect();

    items.sort_by_cached_key(|item| std::cmp::Reverse(timestamp(item.created_at())));
    items
}
