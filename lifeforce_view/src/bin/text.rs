// text.rs - Terminal renderer: prints each committed frame as glyph rows

use lifeforce::{Frame, LifeConfig, RenderError, Simulation};
use lifeforce_view::{config_from_args, init_tracing, patterns};
use std::io::Write;
use std::time::Duration;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = config_from_args(LifeConfig {
        width: 40,
        height: 20,
        tick_interval_ms: 90,
        tick_limit: 120,
        ..LifeConfig::default()
    })?;
    let (interval, tick_limit) = (config.tick_interval(), config.tick_limit);
    let explicit_seed = config.seed_frame.is_some() || config.randomize;

    let mut simulation = Simulation::new(config)?;
    if !explicit_seed {
        // Nothing to watch on an empty grid; start from the glider.
        let (width, height) = (simulation.frame().width(), simulation.frame().height());
        simulation.reseed(patterns::PATTERNS[0].frame(width, height)?);
    }

    let stdout = std::io::stdout();
    simulation.set_renderer(move |frame: &Frame, generation: u64, timestamp: Duration| -> Result<(), RenderError> {
        let seconds = timestamp.as_secs_f64();
        let fps = if seconds >= 1.0 {
            format!("{:.0}", generation as f64 / seconds)
        } else {
            "--".to_string()
        };
        let mut out = stdout.lock();
        // Clear the screen and home the cursor before each frame.
        write!(out, "\x1b[2J\x1b[H{frame}\n\ngenerations: {generation}   fps: {fps}\n")?;
        out.flush()?;
        Ok(())
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let ticks = runtime.block_on(async {
        let stop = simulation.stop_handle();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                stop.stop();
            }
        });
        let outcome = simulation.run(interval, tick_limit).await;
        interrupt.abort();
        outcome
    })?;

    info!(ticks, generation = simulation.generation(), "text renderer finished");
    Ok(())
}
