use meternet_core::{
    catalogue::Catalogue,
    pricing::{effective_cost, gate_wait_seconds, is_allowed, load_seconds},
    tier::Tier,
};

#[test]
fn effective_cost_matches_worked_examples() {
    let catalogue = Catalogue::builtin();

    // $0.05 base at General: 0.05 * 1.25 = 0.0625 -> $0.06
    let social = catalogue.get("social-1").unwrap();
    assert_eq!(effective_cost(social, Tier::General), 0.06);

    // $0.01 base at General: 0.0125 -> $0.01
    let news = catalogue.get("news-1").unwrap();
    assert_eq!(effective_cost(news, Tier::General), 0.01);

    // $0.25 base at PremiumPlus: 0.1875 -> $0.19
    let research = catalogue.get("research-1").unwrap();
    assert_eq!(effective_cost(research, Tier::PremiumPlus), 0.19);

    // Premium pays face value.
    assert_eq!(effective_cost(social, Tier::Premium), 0.05);
}

#[test]
fn cost_is_nonnegative_and_decreases_with_rank() {
    let catalogue = Catalogue::builtin();

    for entry in catalogue.iter() {
        let costs: Vec<f64> = Tier::ALL
            .iter()
            .map(|t| effective_cost(entry, *t))
            .collect();

        for cost in &costs {
            assert!(*cost >= 0.0, "{}: negative cost", entry.id);
        }
        // Higher rank never pays more; strictly less whenever the rounded
        // amounts can differ (all built-in entries cost at least a cent).
        for pair in costs.windows(2) {
            assert!(
                pair[1] <= pair[0],
                "{}: cost rose with rank ({} -> {})",
                entry.id, pair[0], pair[1]
            );
        }
    }
}

#[test]
fn access_follows_tier_rank() {
    let catalogue = Catalogue::builtin();

    for entry in catalogue.iter() {
        for tier in Tier::ALL {
            assert_eq!(
                is_allowed(entry, tier),
                tier.rank() >= entry.required_tier.rank(),
                "{} at {}",
                entry.id, tier
            );
        }
    }

    // PremiumPlus unlocks the whole catalogue.
    assert!(catalogue.iter().all(|e| is_allowed(e, Tier::PremiumPlus)));
}

#[test]
fn delay_tables_per_tier() {
    // Gate wait: ceil(3 / speed) + 1. Load: max(1, ceil(1.2 / speed)).
    assert_eq!(gate_wait_seconds(Tier::General), 6);
    assert_eq!(gate_wait_seconds(Tier::Premium), 5);
    assert_eq!(gate_wait_seconds(Tier::PremiumPlus), 4);

    assert_eq!(load_seconds(Tier::General), 2);
    assert_eq!(load_seconds(Tier::Premium), 2);
    assert_eq!(load_seconds(Tier::PremiumPlus), 2);
}

#[test]
fn search_filters_by_title_and_category() {
    let catalogue = Catalogue::builtin();

    let hits = catalogue.search("news");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "news-1");

    let hits = catalogue.search("STREAMING");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "video-1");

    assert_eq!(catalogue.search("").len(), catalogue.len());
    assert!(catalogue.search("no such thing").is_empty());
}
