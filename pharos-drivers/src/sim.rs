//! Simulated board for host tests
//!
//! Every [`SimPin`] shares one [`Board`], which records each write in order
//! and models the MCP3008: it decodes the command from the clock and data-in
//! edges and drives data-out with the configured value for that channel.

extern crate std;

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use pharos_core::segments::SegmentPattern;
use pharos_core::traits::Broadcast;
use pharos_protocol::{ClientId, PanelEvent};

/// Board line roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    AdcClk,
    AdcDin,
    AdcDout,
    AdcCs,
    Ds,
    Shcp,
    Stcp,
    Relay(u8),
    Led(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimError;

impl embedded_hal::digital::Error for SimError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// MCP3008 seen from its pins
#[derive(Debug, Default)]
struct Mcp3008Model {
    values: [u16; 8],
    selected: bool,
    rising: u8,
    falling: u8,
    command: u8,
    dout: bool,
    /// Command bits (start, mode, channel) of every completed transaction
    commands: Vec<u8>,
}

impl Mcp3008Model {
    fn select(&mut self) {
        self.selected = true;
        self.rising = 0;
        self.falling = 0;
        self.command = 0;
        self.dout = false;
    }

    fn deselect(&mut self) {
        if self.selected {
            self.commands.push(self.command);
        }
        self.selected = false;
    }

    fn clock_rise(&mut self, din: bool) {
        self.rising += 1;
        if self.rising <= 5 {
            self.command = (self.command << 1) | din as u8;
        }
    }

    fn clock_fall(&mut self) {
        self.falling += 1;
        // Falling edge 7 presents B9, edge 16 presents B0
        if (7..=16).contains(&self.falling) {
            let value = self.values[(self.command & 0x07) as usize];
            self.dout = (value >> (16 - self.falling)) & 1 == 1;
        } else {
            self.dout = false;
        }
    }
}

#[derive(Debug, Default)]
struct BoardState {
    levels: Vec<(Line, bool)>,
    log: Vec<(Line, bool)>,
    failing: Option<Line>,
    adc: Mcp3008Model,
}

impl BoardState {
    fn level(&self, line: Line) -> bool {
        self.levels
            .iter()
            .find(|(l, _)| *l == line)
            .map(|(_, high)| *high)
            .unwrap_or(false)
    }

    fn write(&mut self, line: Line, high: bool) -> Result<(), SimError> {
        if self.failing == Some(line) {
            return Err(SimError);
        }

        let previous = self.level(line);
        match self.levels.iter_mut().find(|(l, _)| *l == line) {
            Some(entry) => entry.1 = high,
            None => self.levels.push((line, high)),
        }
        self.log.push((line, high));

        match line {
            Line::AdcCs if previous && !high => self.adc.select(),
            Line::AdcCs if high => self.adc.deselect(),
            Line::AdcClk if self.adc.selected && !previous && high => {
                let din = self.level(Line::AdcDin);
                self.adc.clock_rise(din);
            }
            Line::AdcClk if self.adc.selected && previous && !high => self.adc.clock_fall(),
            _ => {}
        }
        Ok(())
    }

    fn read(&mut self, line: Line) -> Result<bool, SimError> {
        if self.failing == Some(line) {
            return Err(SimError);
        }
        match line {
            Line::AdcDout => Ok(self.adc.dout),
            other => Ok(self.level(other)),
        }
    }
}

/// Shared simulated board
#[derive(Debug, Clone, Default)]
pub struct Board(Rc<RefCell<BoardState>>);

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pin wired to `line`
    pub fn pin(&self, line: Line) -> SimPin {
        SimPin {
            board: self.clone(),
            line,
        }
    }

    /// Value the ADC converts on each channel
    pub fn set_adc_values(&self, values: [u16; 8]) {
        self.0.borrow_mut().adc.values = values;
    }

    pub fn set_adc_value(&self, channel: usize, value: u16) {
        self.0.borrow_mut().adc.values[channel] = value;
    }

    /// Make every access to `line` fail
    pub fn fail(&self, line: Line) {
        self.0.borrow_mut().failing = Some(line);
    }

    pub fn level(&self, line: Line) -> bool {
        self.0.borrow().level(line)
    }

    pub fn log(&self) -> Vec<(Line, bool)> {
        self.0.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.0.borrow_mut().log.clear();
    }

    /// Writes to `line`, in order
    pub fn writes(&self, line: Line) -> Vec<bool> {
        self.0
            .borrow()
            .log
            .iter()
            .filter(|(l, _)| *l == line)
            .map(|(_, high)| *high)
            .collect()
    }

    /// Command bits of every completed ADC transaction
    pub fn adc_commands(&self) -> Vec<u8> {
        self.0.borrow().adc.commands.clone()
    }

    pub fn adc_selected(&self) -> bool {
        self.0.borrow().adc.selected
    }

    /// Number of rising edges on `line`
    pub fn rising_edges(&self, line: Line) -> usize {
        let mut level = false;
        let mut edges = 0;
        for (l, high) in self.0.borrow().log.iter() {
            if *l == line {
                if !level && *high {
                    edges += 1;
                }
                level = *high;
            }
        }
        edges
    }

    /// Data bits clocked into the shift register, grouped by latch pulse
    ///
    /// Bits shifted after the last latch form no frame and are dropped.
    pub fn latched_frames(&self) -> Vec<Vec<bool>> {
        let state = self.0.borrow();
        let mut frames = Vec::new();
        let mut current = Vec::new();
        let (mut ds, mut shcp, mut stcp) = (false, false, false);

        for (line, high) in state.log.iter().copied() {
            match line {
                Line::Ds => ds = high,
                Line::Shcp => {
                    if !shcp && high {
                        current.push(ds);
                    }
                    shcp = high;
                }
                Line::Stcp => {
                    if !stcp && high {
                        frames.push(core::mem::take(&mut current));
                    }
                    stcp = high;
                }
                _ => {}
            }
        }
        frames
    }
}

/// A pin on the simulated board
#[derive(Debug, Clone)]
pub struct SimPin {
    board: Board,
    line: Line,
}

impl ErrorType for SimPin {
    type Error = SimError;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.board.0.borrow_mut().write(self.line, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.board.0.borrow_mut().write(self.line, true)
    }
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.board.0.borrow_mut().read(self.line)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Pattern as wiring-order bits
pub fn bits_of(pattern: SegmentPattern) -> Vec<bool> {
    pattern.bits().collect()
}

/// Broadcast sink that keeps every event with its audience
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub events: Vec<(Option<ClientId>, PanelEvent)>,
}

impl RecordingBus {
    /// Events sent to everyone, in order
    pub fn broadcasts(&self) -> Vec<PanelEvent> {
        self.events
            .iter()
            .filter(|(client, _)| client.is_none())
            .map(|(_, event)| *event)
            .collect()
    }
}

impl Broadcast for RecordingBus {
    fn publish(&mut self, event: PanelEvent) {
        self.events.push((None, event));
    }

    fn publish_to(&mut self, client: ClientId, event: PanelEvent) {
        self.events.push((Some(client), event));
    }
}
