//! Async frame loop
//!
//! Runs engine ticks back to back, sleeping for whatever is left of each
//! frame budget. The enable flag is checked once per cycle of `target_fps`
//! ticks, so a stop request takes effect at the next cycle boundary.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use vellum_core::{Clock, Engine, EngineError, Surface};

use crate::mailbox::Mailbox;

/// Run the engine until it is stopped
///
/// Every instance is destroyed on the way out, also when a structural
/// error ends the loop early.
pub async fn run<C, D>(
    engine: &mut Engine,
    surface: &mut dyn Surface,
    clock: &C,
    delay: &mut D,
) -> Result<(), EngineError>
where
    C: Clock + ?Sized,
    D: DelayNs,
{
    run_loop(engine, surface, clock, delay, |_| {}).await
}

/// Like [`run`], draining `mailbox` into the engine before every tick
pub async fn run_with_mailbox<C, D, M, const N: usize>(
    engine: &mut Engine,
    surface: &mut dyn Surface,
    clock: &C,
    delay: &mut D,
    mailbox: &Mailbox<M, N>,
) -> Result<(), EngineError>
where
    C: Clock + ?Sized,
    D: DelayNs,
    M: RawMutex,
{
    run_loop(engine, surface, clock, delay, |engine| {
        mailbox.drain_into(engine);
    })
    .await
}

async fn run_loop<C, D, P>(
    engine: &mut Engine,
    surface: &mut dyn Surface,
    clock: &C,
    delay: &mut D,
    mut pump: P,
) -> Result<(), EngineError>
where
    C: Clock + ?Sized,
    D: DelayNs,
    P: FnMut(&Engine),
{
    info!(
        "Frame loop started: {} fps, {} ms budget",
        engine.config().target_fps,
        engine.config().frame_budget_ms()
    );

    let result = cycles(engine, surface, clock, delay, &mut pump).await;
    engine.shutdown();

    match &result {
        Ok(()) => info!("Frame loop stopped after {} frames", engine.stats().frames),
        Err(e) => error!("Frame loop aborted: {}", e),
    }
    result
}

async fn cycles<C, D, P>(
    engine: &mut Engine,
    surface: &mut dyn Surface,
    clock: &C,
    delay: &mut D,
    pump: &mut P,
) -> Result<(), EngineError>
where
    C: Clock + ?Sized,
    D: DelayNs,
    P: FnMut(&Engine),
{
    while engine.is_enabled() {
        loop {
            pump(engine);
            let report = engine.tick(surface, clock)?;
            if report.sleep_ms > 0 {
                delay.delay_ms(report.sleep_ms).await;
            }
            if report.cycle_complete {
                break;
            }
        }
    }
    Ok(())
}
