//! Panel controller
//!
//! Owns every peripheral driver plus the dark flag and the delay queue. All
//! methods run to completion without waiting; anything that has to happen
//! later is armed as a [`Job`] and executed by [`Panel::run_due`].

use pharos_protocol::{AdcChannel, ChannelTarget, ClientId, LedId, Level, PanelCommand, PanelEvent};

use super::{Job, PanelError, TickReport};
use crate::config::PanelConfig;
use crate::scheduler::{Clock, Deferred, DelayQueue, ScheduleError};
use crate::segments::Glyph;
use crate::traits::{AnalogSampler, Broadcast, DigitShifter, FrameStart, LedOutputs, PulseOutputs};

/// Queue slots pulses may not take, so a display step can always be armed
///
/// At most one shift step is armed at any time.
const DISPLAY_RESERVE: usize = 1;

/// The peripheral panel
///
/// Generic over its drivers so the same logic runs on the board and against
/// fake lines in tests.
pub struct Panel<A, S, P, L> {
    config: PanelConfig,
    sampler: A,
    shifter: S,
    pulses: P,
    leds: L,
    queue: DelayQueue<Job>,
    dark: bool,
}

impl<A, S, P, L> Panel<A, S, P, L>
where
    A: AnalogSampler,
    S: DigitShifter,
    P: PulseOutputs,
    L: LedOutputs,
{
    /// Assemble a panel from its drivers
    pub fn new(config: PanelConfig, sampler: A, shifter: S, pulses: P, leds: L) -> Self {
        Self {
            config,
            sampler,
            shifter,
            pulses,
            leds,
            queue: DelayQueue::new(),
            dark: false,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Current dark flag
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Relay outputs, for inspection
    pub fn pulses(&self) -> &P {
        &self.pulses
    }

    /// LED outputs, for inspection
    pub fn leds(&self) -> &L {
        &self.leds
    }

    /// Earliest instant at which deferred work is due
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.next_due()
    }

    /// Number of armed continuations
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run one sampling cycle
    ///
    /// Starts the seconds display, samples channels 0-7 in order and
    /// publishes each reading. Right after the light-sensor reading is
    /// published the dark flag and indicator LED are updated.
    ///
    /// A display frame that cannot be started is dropped and reported in
    /// [`TickReport::display`]; only a failed ADC or LED line fails the tick.
    pub fn tick<C, B>(&mut self, clock: &C, bus: &mut B) -> Result<TickReport, PanelError>
    where
        C: Clock,
        B: Broadcast,
    {
        let now_ms = clock.now_ms();
        let second = clock.second_of_minute();
        let display = self.start_display(now_ms, second);

        let mut samples = [0u16; pharos_protocol::ADC_CHANNELS as usize];
        for channel in AdcChannel::all() {
            let value = self.sampler.sample(channel)?;
            samples[channel.index() as usize] = value;
            bus.publish(PanelEvent::analog(channel, value));

            if channel == self.config.light_sensor.channel {
                self.update_dark(value, bus)?;
            }
        }

        Ok(TickReport {
            second,
            samples,
            dark: self.dark,
            display,
        })
    }

    /// Run every continuation due at `now_ms`
    ///
    /// Returns how many ran. Chains that re-arm themselves with a zero delay
    /// run to completion within one call.
    pub fn run_due<B: Broadcast>(&mut self, now_ms: u64, bus: &mut B) -> Result<usize, PanelError> {
        let mut ran = 0;

        while let Some((due_ms, job)) = self.queue.pop_due(now_ms) {
            ran += 1;
            match job {
                Job::ShiftStep => {
                    if self.shifter.step(self.dark)?.needs_step() {
                        self.arm_shift_step(due_ms)?;
                    }
                }
                Job::Release(target) => {
                    self.pulses.set_level(target, Level::Low)?;
                    bus.publish(PanelEvent::channel(target, Level::Low));
                }
            }
        }

        Ok(ran)
    }

    /// Pulse a relay line high, releasing it after the hold time
    ///
    /// Each pulse owns its release. A second pulse on the same line does not
    /// extend or cancel the first, so the line drops when the earlier
    /// release fires.
    pub fn pulse<B: Broadcast>(
        &mut self,
        now_ms: u64,
        target: ChannelTarget,
        bus: &mut B,
    ) -> Result<(), PanelError> {
        // The last free slot belongs to the display's step chain
        if self.queue.free() <= DISPLAY_RESERVE {
            return Err(ScheduleError::QueueFull.into());
        }

        // Arm first: a line is never raised without a pending release
        let hold = Deferred::new(self.config.timing.pulse_hold_ms, Job::Release(target));
        self.queue.arm(now_ms, hold)?;

        self.pulses.set_level(target, Level::High)?;
        bus.publish(PanelEvent::channel(target, Level::High));
        Ok(())
    }

    /// Execute an inbound command
    pub fn handle<B: Broadcast>(
        &mut self,
        now_ms: u64,
        command: PanelCommand,
        bus: &mut B,
    ) -> Result<(), PanelError> {
        match command {
            PanelCommand::Pulse(target) => self.pulse(now_ms, target, bus),
            PanelCommand::Led { led, action } => {
                let on = self.leds.apply(led, action)?;
                bus.publish(PanelEvent::led(led, on));
                Ok(())
            }
            PanelCommand::Connect(client) => {
                self.client_connected(client, bus);
                Ok(())
            }
        }
    }

    /// Bring a newly connected observer up to date
    pub fn client_connected<B: Broadcast>(&self, client: ClientId, bus: &mut B) {
        for led in LedId::all() {
            bus.publish_to(client, PanelEvent::led(led, self.leds.is_on(led)));
        }
    }

    fn update_dark<B: Broadcast>(&mut self, value: u16, bus: &mut B) -> Result<(), PanelError> {
        let sensor = self.config.light_sensor;
        self.dark = sensor.is_dark(value);

        let on = self.leds.set(sensor.indicator_led, self.dark)?;
        bus.publish(PanelEvent::led(sensor.indicator_led, on));
        Ok(())
    }

    fn start_display(&mut self, now_ms: u64, second: u8) -> Result<FrameStart, PanelError> {
        let (units, tens) = Glyph::decimal_pair(second);
        let start = self.shifter.display(units, tens)?;
        if start == FrameStart::Started {
            self.arm_shift_step(now_ms)?;
        }
        Ok(start)
    }

    /// Arm the next display step, or abandon the display if it cannot be armed
    fn arm_shift_step(&mut self, from_ms: u64) -> Result<(), PanelError> {
        let step = Deferred::new(self.config.timing.shift_step_ms, Job::ShiftStep);
        if let Err(err) = self.queue.arm(from_ms, step) {
            // An unarmed frame would never finish and block every later one
            self.shifter.clear();
            return Err(err.into());
        }
        Ok(())
    }
}
