use meternet_core::{
    engine::MeterEngine,
    snapshot::SNAPSHOT_INTERVAL,
    tier::Tier,
};

#[test]
fn session_started_is_the_first_journal_entry() {
    let engine = MeterEngine::build("sess-start".into(), 31).unwrap();

    let events = engine.events_for_tick(0).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "session_started");
    assert_eq!(events[0].source, "engine");
}

#[test]
fn operations_are_stamped_with_the_tick_they_ran_at() {
    let mut engine = MeterEngine::build("sess-stamp".into(), 32).unwrap();

    engine.run_ticks(7).unwrap();
    engine.evaluate_click("news-1").unwrap();
    engine.top_up(2.0).unwrap();

    let events = engine.events_for_tick(7).unwrap();
    let kinds: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(kinds, ["click_granted", "balance_topped_up"]);
}

#[test]
fn snapshot_saved_on_interval_and_reflects_the_account() {
    let mut engine = MeterEngine::build("sess-snap".into(), 33).unwrap();

    engine.evaluate_click("news-1").unwrap(); // balance $9.99
    engine.upgrade_to(Tier::Premium).unwrap(); // pool $0.00
    engine.run_ticks(SNAPSHOT_INTERVAL).unwrap();

    let (at, snapshot) = engine
        .snapshot_before(SNAPSHOT_INTERVAL)
        .unwrap()
        .expect("snapshot after one interval");

    assert_eq!(at, SNAPSHOT_INTERVAL);
    assert_eq!(snapshot.account.balance, 9.99);
    assert_eq!(snapshot.account.topup_pool, 0.0);
    assert_eq!(snapshot.account.tier, Tier::Premium);

    // Nothing journalled before the first interval boundary.
    assert!(engine.snapshot_before(SNAPSHOT_INTERVAL - 1).unwrap().is_none());
}

#[test]
fn live_snapshot_matches_account_state() {
    let mut engine = MeterEngine::build("sess-live".into(), 34).unwrap();

    engine.top_up(10.0).unwrap();
    let snapshot = engine.snapshot();

    assert_eq!(snapshot.session_id, "sess-live");
    assert_eq!(snapshot.tick, 0);
    assert_eq!(&snapshot.account, engine.account());
    assert_eq!(snapshot.account.balance, 20.0);
}
