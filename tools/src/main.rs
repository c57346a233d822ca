//! session-runner: headless demo session for MeterNet.
//!
//! Usage:
//!   session-runner --seed 12345
//!   session-runner --seed 12345 --ipc-mode < commands.jsonl
//!
//! Without --ipc-mode, runs a built-in scripted session and prints a
//! summary. With it, reads one SessionCommand JSON per stdin line and
//! prints a UiState JSON after each.

mod fx;

use anyhow::Result;
use meternet_core::{
    command::SessionCommand,
    engine::MeterEngine,
    error::MeterError,
    rng::{RngBank, StreamSlot},
    tier::Tier,
    types::Tick,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Serialize)]
struct UiState {
    tick: Tick,
    paused: bool,
    balance: f64,
    topup_pool: f64,
    tier: Tier,
    reminders_enabled: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let session_id = format!("session-{}", uuid::Uuid::new_v4());

    if !ipc_mode {
        println!("MeterNet — session-runner");
        println!("  session:  {session_id}");
        println!("  seed:     {seed}");
        println!("  started:  {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!();
    }

    let mut engine = MeterEngine::build(session_id, seed)?;
    engine.register_observer(Box::new(fx::AmbientFx));
    engine.register_observer(Box::new(fx::AdBreak::new(
        RngBank::new(seed).for_stream(StreamSlot::Ambient),
    )));

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        run_demo_script(&mut engine)?;
        print_summary(&engine)?;
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut MeterEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: SessionCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        apply(engine, cmd, true)?;
        writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
        stdout.flush()?;
    }
    Ok(())
}

/// A short scripted tour of the engine: an affordable click, a tier gate,
/// an upgrade, clicks at the new tier, an exhausted pool, a failed
/// second upgrade, and enough idle time for reminders to fire.
fn run_demo_script(engine: &mut MeterEngine) -> Result<()> {
    let script = [
        SessionCommand::Click { result_id: "news-1".into() },
        SessionCommand::Wait { ticks: 5 },
        SessionCommand::Click { result_id: "social-1".into() },
        SessionCommand::Upgrade { tier: Tier::Premium },
        SessionCommand::Click { result_id: "social-1".into() },
        SessionCommand::Click { result_id: "video-1".into() },
        SessionCommand::Click { result_id: "research-1".into() },
        SessionCommand::TopUp { amount: 5.0 },
        SessionCommand::Wait { ticks: 15 },
        SessionCommand::Upgrade { tier: Tier::PremiumPlus },
        SessionCommand::Reminders { enabled: false },
        SessionCommand::Wait { ticks: 10 },
    ];

    for cmd in script {
        apply(engine, cmd, false)?;
    }
    Ok(())
}

/// Run one command against the engine. Engine rejections are printed (or
/// logged in quiet mode) and never abort the session; only journal and
/// serialization failures propagate.
fn apply(engine: &mut MeterEngine, cmd: SessionCommand, quiet: bool) -> Result<()> {
    let mut say = |line: String| {
        if quiet {
            log::info!("{line}");
        } else {
            println!("{line}");
        }
    };

    match cmd {
        SessionCommand::Click { result_id } => match engine.evaluate_click(&result_id) {
            Ok(receipt) => say(format!(
                "click {result_id}: {:?} cost=${:.2} delay={}s — {}",
                receipt.outcome, receipt.cost, receipt.delay_seconds, receipt.message
            )),
            Err(e) => return rejected(e, &mut say),
        },
        SessionCommand::TopUp { amount } => match engine.top_up(amount) {
            Ok(receipt) => say(format!(
                "top-up: +${:.2} balance=${:.2} pool=${:.2}",
                receipt.transferred, receipt.new_balance, receipt.new_pool
            )),
            Err(e) => return rejected(e, &mut say),
        },
        SessionCommand::Upgrade { tier } => match engine.upgrade_to(tier) {
            Ok(receipt) => say(format!(
                "upgrade: now {} pool=${:.2}",
                receipt.new_tier, receipt.new_pool
            )),
            Err(e) => return rejected(e, &mut say),
        },
        SessionCommand::Reminders { enabled } => {
            engine.set_reminders_enabled(enabled)?;
            say(format!("reminders: enabled={enabled}"));
        }
        SessionCommand::Wait { ticks } => {
            engine.run_ticks(ticks)?;
            say(format!("wait: {} ticks (now t={})", ticks, engine.clock.current_tick));
        }
    }
    Ok(())
}

fn rejected(e: MeterError, say: &mut impl FnMut(String)) -> Result<()> {
    match e {
        MeterError::Journal(_) | MeterError::Serialization(_) | MeterError::Other(_) => {
            Err(e.into())
        }
        recoverable => {
            say(format!("rejected: {recoverable}"));
            Ok(())
        }
    }
}

fn build_ui_state(engine: &MeterEngine) -> UiState {
    let account = engine.account();
    UiState {
        tick: engine.clock.current_tick,
        paused: engine.clock.paused,
        balance: account.balance,
        topup_pool: account.topup_pool,
        tier: account.tier,
        reminders_enabled: engine.reminders_enabled(),
    }
}

fn print_summary(engine: &MeterEngine) -> Result<()> {
    let account = engine.account();
    let granted = engine.count_events_of_type("click_granted")?;
    let no_funds = engine.count_events_of_type("click_blocked_no_funds")?;
    let gated = engine.count_events_of_type("click_blocked_tier_gate")?;
    let reminders = engine.count_events_of_type("reminder_issued")?;

    println!();
    println!("=== SESSION SUMMARY ===");
    println!("  final tick:     {}", engine.clock.current_tick);
    println!("  tier:           {}", account.tier);
    println!("  balance:        ${:.2}", account.balance);
    println!("  top-up pool:    ${:.2}", account.topup_pool);
    println!("  clicks granted: {granted}");
    println!("  blocked (funds):{no_funds}");
    println!("  blocked (tier): {gated}");
    println!("  reminders:      {reminders}");
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
