//! Two engines, same seed, same operations — the journals must agree
//! entry for entry. Any divergence means a platform RNG or unstable
//! ordering crept in.

use meternet_core::{engine::MeterEngine, tier::Tier};

fn collect_event_log(engine: &MeterEngine) -> Vec<(String, String)> {
    (0..=engine.clock.current_tick)
        .flat_map(|tick| {
            engine
                .events_for_tick(tick)
                .expect("read events")
                .into_iter()
                .map(|e| (e.event_type, e.payload))
        })
        .collect()
}

fn drive_session(engine: &mut MeterEngine) {
    engine.evaluate_click("news-1").unwrap();
    engine.run_ticks(10).unwrap();
    engine.evaluate_click("social-1").unwrap();
    engine.upgrade_to(Tier::Premium).unwrap();
    engine.evaluate_click("social-1").unwrap();
    engine.run_ticks(30).unwrap();
    // Both rejections journal deterministic events: the pool is empty
    // after the Premium upgrade.
    let _ = engine.top_up(5.0);
    let _ = engine.upgrade_to(Tier::PremiumPlus);
    engine.run_ticks(50).unwrap();
}

#[test]
fn same_seed_produces_identical_event_logs() {
    const SEED: u64 = 0xC01_FEE;
    let _ = env_logger::builder().is_test(true).try_init();

    let mut engine_a = MeterEngine::build("det-a".into(), SEED).unwrap();
    let mut engine_b = MeterEngine::build("det-b".into(), SEED).unwrap();

    drive_session(&mut engine_a);
    drive_session(&mut engine_b);

    let log_a = collect_event_log(&engine_a);
    let log_b = collect_event_log(&engine_b);

    assert_eq!(
        log_a.len(), log_b.len(),
        "Event log lengths differ: {} vs {}",
        log_a.len(), log_b.len()
    );

    // The session_started payloads embed the session id; compare from
    // the first operational event onward.
    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate().skip(1) {
        assert_eq!(a, b, "Event log diverged at entry {i}");
    }
}

#[test]
fn different_seeds_produce_different_reminder_streams() {
    let mut engine_a = MeterEngine::build("det-seed-a".into(), 42).unwrap();
    let mut engine_b = MeterEngine::build("det-seed-b".into(), 99).unwrap();

    // 40 reminders each; with three candidate messages per slot, two
    // independent streams agreeing on all 40 picks means the seed is
    // not reaching the RNG.
    engine_a.run_ticks(360).unwrap();
    engine_b.run_ticks(360).unwrap();

    let log_a = collect_event_log(&engine_a);
    let log_b = collect_event_log(&engine_b);

    let any_different = log_a
        .iter()
        .zip(log_b.iter())
        .filter(|((kind, _), _)| kind.as_str() == "reminder_issued")
        .any(|((_, a), (_, b))| a != b);
    assert!(any_different, "Different seeds produced identical reminder streams");
}
