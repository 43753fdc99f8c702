/// Property-based tests using proptest
/// Tests invariants of the simulated listing, pagination and filter builder
use chrono::{Duration, TimeZone, Utc};
use enrichment_analytics_api::gold_filter::GoldFilter;
use enrichment_analytics_api::models::{total_pages, PageRequest};
use enrichment_analytics_api::simulator::{generate_items, simulated_page, WINDOW_DAYS};
use proptest::prelude::*;
use sqlx::{Postgres, QueryBuilder};

// Property: same page, same items
proptest! {
    #[test]
    fn generation_is_deterministic_per_page(page in 1u32..10_000, limit in 1u32..=100) {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        prop_assert_eq!(generate_items(page, limit, now), generate_items(page, limit, now));
    }

    #[test]
    fn generation_returns_exactly_limit(page in 1u32..10_000, limit in 1u32..=100) {
        let now = Utc::now();
        prop_assert_eq!(generate_items(page, limit, now).len(), limit as usize);
    }

    #[test]
    fn smaller_limit_is_a_prefix(page in 1u32..1_000, limit in 2u32..=100) {
        let now = Utc::now();
        let full = generate_items(page, limit, now);
        let short = generate_items(page, limit - 1, now);
        prop_assert_eq!(&full[..short.len()], &short[..]);
    }
}

// Property: timestamps stay inside the window
proptest! {
    #[test]
    fn timestamps_within_window(page in 1u32..10_000) {
        let now = Utc::now();
        let oldest = now - Duration::days(WINDOW_DAYS);
        for item in generate_items(page, 50, now) {
            prop_assert!(item.created_at >= oldest);
            prop_assert!(item.updated_at >= item.created_at);
            prop_assert!(item.updated_at <= now);
        }
    }
}

// Property: total_pages == ceil(total / limit)
proptest! {
    #[test]
    fn total_pages_is_ceiling(total in 0u64..1_000_000, limit in 1u32..=100) {
        let pages = total_pages(total, limit);
        prop_assert!(pages * limit as u64 >= total);
        if total > 0 {
            prop_assert!((pages - 1) * (limit as u64) < total);
        } else {
            prop_assert_eq!(pages, 0);
        }
    }

    #[test]
    fn simulated_meta_matches_fixed_total(page in 1u32..500, limit in 1u32..=100) {
        let result = simulated_page(PageRequest { page, limit }, Utc::now());
        prop_assert_eq!(result.meta.total_items, 5000);
        prop_assert_eq!(result.meta.total_pages, 5000u64.div_ceil(limit as u64));
        prop_assert_eq!(result.meta.current_page, page);
    }
}

// Property: arbitrary filter text never leaks into SQL
proptest! {
    #[test]
    fn filter_values_are_always_bound(workspace in "\\PC*", status in "\\PC*") {
        let filter = GoldFilter::from_params(Some(&workspace), Some(&status), None, None).unwrap();
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM t");
        filter.push_where(&mut qb);
        let sql = qb.sql();

        let expected = match (workspace.trim().is_empty(), status.trim().is_empty()) {
            (true, true) => "SELECT 1 FROM t",
            (false, true) => "SELECT 1 FROM t WHERE id_workspace::text = $1",
            (true, false) => "SELECT 1 FROM t WHERE status_processamento = $1",
            (false, false) => {
                "SELECT 1 FROM t WHERE id_workspace::text = $1 AND status_processamento = $2"
            }
        };
        prop_assert_eq!(sql, expected);
    }
}
