//! Panel task
//!
//! Owns the panel and every line it drives. Waits for whichever comes first:
//! a sampling tick, the earliest deferred job, or a command from the uplink.
//! Due jobs are run after each wake-up.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Instant, Timer};

use pharos_core::panel::{Panel, PanelError};
use pharos_core::scheduler::Clock;
use pharos_drivers::{Hc595, LedBank, Mcp3008, PulseController};

use super::tick::TICK_SIGNAL;
use crate::channels::COMMAND_CHANNEL;
use crate::uplink::{UplinkBroadcast, UptimeClock};

/// Longest idle wait when nothing is deferred
const IDLE_WAIT: Duration = Duration::from_secs(60);

/// The panel as wired on the board
pub type BoardPanel = Panel<
    Mcp3008<Output<'static>, Output<'static>, Input<'static>, Output<'static>>,
    Hc595<Output<'static>, Output<'static>, Output<'static>>,
    PulseController<Output<'static>>,
    LedBank<Output<'static>>,
>;

/// Panel task - samples, shifts digits and times pulses
#[embassy_executor::task]
pub async fn panel_task(mut panel: BoardPanel) {
    info!("Panel task started");

    let clock = UptimeClock;
    let mut bus = UplinkBroadcast;

    loop {
        let deadline = match panel.next_deadline() {
            Some(due_ms) => Instant::from_millis(due_ms),
            None => Instant::now() + IDLE_WAIT,
        };

        match select3(
            TICK_SIGNAL.wait(),
            Timer::at(deadline),
            COMMAND_CHANNEL.receive(),
        )
        .await
        {
            Either3::First(()) => match panel.tick(&clock, &mut bus) {
                Ok(report) => {
                    trace!(
                        "Tick: second {} dark={} light={}",
                        report.second,
                        report.dark,
                        report.samples[panel.config().light_sensor.channel.index() as usize]
                    );
                    if let Err(e) = report.display {
                        report_error("Display frame", e);
                    }
                }
                Err(e) => report_error("Tick", e),
            },
            Either3::Second(()) => {}
            Either3::Third(command) => {
                debug!("Command: {:?}", command);
                if let Err(e) = panel.handle(clock.now_ms(), command, &mut bus) {
                    report_error("Command", e);
                }
            }
        }

        if let Err(e) = panel.run_due(clock.now_ms(), &mut bus) {
            report_error("Deferred job", e);
        }
    }
}

fn report_error(context: &str, err: PanelError) {
    warn!("{} failed: {:?}", context, err);
}
