//! Synthetic source listing.
//!
//! Each page is generated from a generator seeded with the page number alone, so
//! asking twice for the same page yields the same jobs. Timestamps are offsets
//! from the supplied `now` and therefore move with the clock.

use crate::models::{
    ContactType, EnrichmentItem, EnrichmentStatus, Page, PageRequest, PaginationMeta,
};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Size of the simulated source dataset.
pub const TOTAL_ITEMS: u64 = 5000;

/// How far back `created_at` may go.
pub const WINDOW_DAYS: i64 = 30;

const SURNAMES: &[&str] = &[
    "Silva", "Souza", "Costa", "Oliveira", "Pereira", "Almeida", "Ferreira", "Rodrigues",
    "Gomes", "Martins", "Araújo", "Barbosa", "Ribeiro", "Carvalho", "Rocha", "Moreira",
    "Cardoso", "Teixeira", "Mendes", "Nunes", "Lima", "Correia", "Pinto", "Moura",
];

const COMPANY_SUFFIXES: &[&str] = &["S.A.", "S/A", "Ltda.", "- ME", "- EI", "e Filhos"];

const CONTACT_TYPES: &[ContactType] = &[ContactType::Company, ContactType::Person];

const STATUSES: &[EnrichmentStatus] = &[
    EnrichmentStatus::Completed,
    EnrichmentStatus::Processing,
    EnrichmentStatus::Failed,
    EnrichmentStatus::Canceled,
];

/// Builds one page of the simulated listing against a fixed total of [`TOTAL_ITEMS`].
pub fn simulated_page(request: PageRequest, now: DateTime<Utc>) -> Page<EnrichmentItem> {
    let data = generate_items(request.page, request.limit, now);
    Page::new(PaginationMeta::new(request, TOTAL_ITEMS), data)
}

/// Generates exactly `limit` items for `page`.
pub fn generate_items(page: u32, limit: u32, now: DateTime<Utc>) -> Vec<EnrichmentItem> {
    let mut rng = StdRng::seed_from_u64(page as u64);
    (0..limit).map(|_| generate_item(&mut rng, now)).collect()
}

fn generate_item(rng: &mut StdRng, now: DateTime<Utc>) -> EnrichmentItem {
    let window_secs = WINDOW_DAYS * 24 * 60 * 60;
    let age = rng.gen_range(0..=window_secs);
    let created_at = now - Duration::seconds(age);
    let updated_at = created_at + Duration::seconds(rng.gen_range(0..=age));

    EnrichmentItem {
        id: random_uuid(rng),
        id_workspace: random_uuid(rng),
        workspace_name: company_name(rng),
        total_contacts: rng.gen_range(50..=2000),
        contact_type: *CONTACT_TYPES.choose(rng).unwrap_or(&ContactType::Company),
        status: *STATUSES.choose(rng).unwrap_or(&EnrichmentStatus::Completed),
        created_at,
        updated_at,
    }
}

fn random_uuid(rng: &mut StdRng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

fn surname(rng: &mut StdRng) -> &'static str {
    SURNAMES.choose(rng).copied().unwrap_or("Silva")
}

fn company_name(rng: &mut StdRng) -> String {
    let suffix = COMPANY_SUFFIXES.choose(rng).copied().unwrap_or("Ltda.");
    match rng.gen_range(0..3) {
        0 => format!("{} {}", surname(rng), suffix),
        1 => format!("{} {} {}", surname(rng), surname(rng), suffix),
        _ => format!("{} e {}", surname(rng), surname(rng)),
    }
}

/// Rolls the synthetic throttling dice with a thread-local generator.
pub fn should_throttle(rate: f64) -> bool {
    rate > 0.0 && rand::thread_rng().gen_bool(rate.min(1.0))
}
