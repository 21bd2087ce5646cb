use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use lifeforce::{Frame, LifeError, RenderError, RunState, Simulation};
use tokio::time::Instant;

fn blinker() -> Simulation {
    Simulation::from_rows(vec![
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 1, 0, 0],
        vec![0, 0, 1, 0, 0],
        vec![0, 0, 1, 0, 0],
        vec![0, 0, 0, 0, 0],
    ])
    .expect("valid seed")
}

fn record_generations(sim: &mut Simulation) -> Rc<RefCell<Vec<u64>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    sim.set_renderer(move |_: &Frame, generation: u64, _: Duration| -> Result<(), RenderError> {
        sink.borrow_mut().push(generation);
        Ok(())
    });
    seen
}

#[tokio::test(start_paused = true)]
async fn run_renders_at_start_and_stops_at_limit() {
    let mut sim = blinker();
    let seen = record_generations(&mut sim);
    let started = Instant::now();

    let ticks = sim.run(Duration::from_millis(200), 3).await.expect("run");

    assert_eq!(ticks, 3);
    assert_eq!(*seen.borrow(), vec![0, 1, 2, 3]);
    assert_eq!(sim.state(), RunState::Stopped);
    assert!(started.elapsed() >= Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn stop_handle_ends_an_unbounded_run() {
    let mut sim = blinker();
    let handle = sim.stop_handle();

    let (ticks, ()) = tokio::join!(sim.run(Duration::from_millis(100), 0), async move {
        tokio::time::sleep(Duration::from_millis(350)).await;
        handle.stop();
    });

    assert_eq!(ticks.expect("run"), 3);
    assert_eq!(sim.generation(), 3);
    assert_eq!(sim.state(), RunState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn renderer_can_request_stop() {
    let mut sim = blinker();
    let handle = sim.stop_handle();
    sim.set_renderer(move |_: &Frame, generation: u64, _: Duration| -> Result<(), RenderError> {
        if generation == 5 {
            handle.stop();
        }
        Ok(())
    });

    let ticks = sim.run(Duration::from_millis(50), 100).await.expect("run");
    assert_eq!(ticks, 5);
}

#[tokio::test(start_paused = true)]
async fn stale_stop_does_not_block_next_run() {
    let mut sim = blinker();
    sim.stop_handle().stop();

    let ticks = sim.run(Duration::from_millis(10), 2).await.expect("run");
    assert_eq!(ticks, 2);
    assert!(!sim.stop_handle().is_stop_requested());
}

#[tokio::test(start_paused = true)]
async fn render_errors_propagate_out_of_run() {
    let mut sim = blinker();
    sim.set_renderer(|_: &Frame, generation: u64, _: Duration| -> Result<(), RenderError> {
        if generation == 2 {
            return Err("canvas detached".into());
        }
        Ok(())
    });

    let outcome = sim.run(Duration::from_millis(10), 10).await;
    assert!(matches!(outcome, Err(LifeError::Render(_))));
    assert_eq!(sim.generation(), 2);
    assert_eq!(sim.state(), RunState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn zero_interval_is_rejected() {
    let mut sim = blinker();
    let outcome = sim.run(Duration::ZERO, 1).await;
    assert!(matches!(outcome, Err(LifeError::Configuration(_))));
    assert_eq!(sim.state(), RunState::NotStarted);
}

#[test]
fn run_blocking_drives_its_own_runtime() {
    let mut sim = blinker();
    let seen = record_generations(&mut sim);
    let ticks = sim.run_blocking(Duration::from_millis(1), 4).expect("run");
    assert_eq!(ticks, 4);
    assert_eq!(seen.borrow().last(), Some(&4));
    // Period two: back to the vertical bar.
    assert!(sim.frame().is_alive(2, 1) && sim.frame().is_alive(2, 3));
}
