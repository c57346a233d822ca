use meternet_core::{
    engine::MeterEngine,
    event::EngineEvent,
    reminder::REMINDER_INTERVAL,
};

fn reminder_messages(engine: &MeterEngine) -> Vec<String> {
    (0..=engine.clock.current_tick)
        .flat_map(|tick| engine.events_for_tick(tick).expect("read events"))
        .filter(|e| e.event_type == "reminder_issued")
        .map(|e| {
            match serde_json::from_str::<EngineEvent>(&e.payload).expect("decode event") {
                EngineEvent::ReminderIssued { message, .. } => message,
                other => panic!("wrong event under reminder_issued: {other:?}"),
            }
        })
        .collect()
}

#[test]
fn reminders_fire_on_every_interval_boundary() {
    let mut engine = MeterEngine::build("rem-interval".into(), 21).unwrap();

    engine.run_ticks(3 * REMINDER_INTERVAL).unwrap();

    assert_eq!(engine.count_events_of_type("reminder_issued").unwrap(), 3);
    for boundary in [REMINDER_INTERVAL, 2 * REMINDER_INTERVAL, 3 * REMINDER_INTERVAL] {
        let events = engine.events_for_tick(boundary).unwrap();
        assert!(
            events.iter().any(|e| e.event_type == "reminder_issued"),
            "no reminder at tick {boundary}"
        );
    }
    // Nothing fires off-boundary.
    let events = engine.events_for_tick(REMINDER_INTERVAL + 1).unwrap();
    assert!(events.is_empty());
}

#[test]
fn messages_come_from_the_fixed_set() {
    let mut engine = MeterEngine::build("rem-messages".into(), 22).unwrap();

    engine.run_ticks(10 * REMINDER_INTERVAL).unwrap();

    // Balance and pool never changed, so the parameterized texts are known.
    let account = engine.account();
    let expected = [
        format!("You have ${:.2} credits left.", account.balance),
        "Upgrade required for some results.".to_string(),
        format!("Top-up available: ${:.2}.", account.topup_pool),
    ];

    let messages = reminder_messages(&engine);
    assert_eq!(messages.len(), 10);
    for message in &messages {
        assert!(
            expected.contains(message),
            "unexpected reminder text: {message}"
        );
    }
}

#[test]
fn reminders_track_the_current_account_state() {
    let mut engine = MeterEngine::build("rem-params".into(), 23).unwrap();

    engine.top_up(7.5).unwrap(); // balance $17.50, pool $42.50
    engine.run_ticks(12 * REMINDER_INTERVAL).unwrap();

    // Whenever a parameterized message fired, it must quote the
    // post-top-up figures.
    for message in reminder_messages(&engine) {
        if message.starts_with("You have") {
            assert_eq!(message, "You have $17.50 credits left.");
        } else if message.starts_with("Top-up") {
            assert_eq!(message, "Top-up available: $42.50.");
        }
    }
}

#[test]
fn toggle_silences_and_restores_the_scheduler() {
    let mut engine = MeterEngine::build("rem-toggle".into(), 24).unwrap();

    engine.set_reminders_enabled(false).unwrap();
    engine.run_ticks(5 * REMINDER_INTERVAL).unwrap();
    assert_eq!(engine.count_events_of_type("reminder_issued").unwrap(), 0);

    engine.set_reminders_enabled(true).unwrap();
    engine.run_ticks(2 * REMINDER_INTERVAL).unwrap();
    assert_eq!(engine.count_events_of_type("reminder_issued").unwrap(), 2);

    assert_eq!(engine.count_events_of_type("reminders_toggled").unwrap(), 2);
}

#[test]
fn same_seed_repeats_the_message_sequence() {
    let mut engine_a = MeterEngine::build("rem-det-a".into(), 25).unwrap();
    let mut engine_b = MeterEngine::build("rem-det-b".into(), 25).unwrap();

    engine_a.run_ticks(20 * REMINDER_INTERVAL).unwrap();
    engine_b.run_ticks(20 * REMINDER_INTERVAL).unwrap();

    assert_eq!(reminder_messages(&engine_a), reminder_messages(&engine_b));
}
