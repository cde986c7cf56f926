use anyhow::Context;
use chronos_core::config::Config;
use chronos_core::planner::{execute, Msg, Planner};
use chronos_core::store::Store;
use chronos_core::types::{DayOfWeek, Moment};
use chronos_server::state::ServerEvent;
use chronos_server::ticker::Ticker;
use std::io::IsTerminal;
use std::path::Path;
use tokio::sync::broadcast::{self, error::RecvError};

pub fn run(root: &Path, day: Option<&str>, once: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let store = Store::open_project(root).context("failed to open store")?;

    let (mut planner, commands) = Planner::new(&config, Moment::now());
    for command in commands {
        let outcome = execute(&store, command);
        planner.dispatch(&store, outcome);
    }
    if let Some(d) = day {
        let day = d
            .parse::<DayOfWeek>()
            .with_context(|| format!("invalid --day '{d}'"))?;
        planner.update(Msg::SelectDay(day));
    }
    log_failure(&mut planner);

    if once {
        draw(&planner, false);
        return Ok(());
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (tx, mut rx) = broadcast::channel(16);
        let ticker = Ticker::start(config.tick_period(), tx);
        tracing::info!(period = ?config.tick_period(), "watching {}", planner.selected_day);

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Ok(ServerEvent::Tick(now)) => {
                        planner.dispatch(&store, Msg::Refresh);
                        planner.update(Msg::Tick(now));
                        log_failure(&mut planner);
                        draw(&planner, true);
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(n)) => tracing::warn!(skipped = n, "board fell behind the clock"),
                    Err(RecvError::Closed) => break,
                },
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        ticker.stop().await
    })
}

/// Surface a failed planner command once; the board keeps its last good data.
fn log_failure(planner: &mut Planner) {
    if let Some(error) = planner.last_error.take() {
        tracing::warn!("{error}");
    }
}

fn draw(planner: &Planner, live: bool) {
    let mut out = String::new();
    if live && std::io::stdout().is_terminal() {
        out.push_str("\x1b[2J\x1b[H");
    }
    for line in super::day::render(&planner.view()) {
        out.push_str(&line);
        out.push('\n');
    }
    if live {
        out.push_str(&format!("\nas of {} (ctrl-c to quit)\n", planner.now));
    }
    print!("{out}");
}
