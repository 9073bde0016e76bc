//! End-to-end panel behavior over the real drivers on a simulated board

extern crate std;

use std::vec::Vec;

use pharos_core::config::PanelConfig;
use pharos_core::panel::Panel;
use pharos_core::scheduler::{Clock, ManualClock};
use pharos_core::segments::{pattern_for, Glyph, DECIMAL_POINT_BIT};
use pharos_protocol::{
    AdcChannel, ChannelTarget, Frame, FrameParser, LedId, Level, PanelCommand, PanelEvent, Topic,
};

use crate::adc::Mcp3008;
use crate::display::Hc595;
use crate::led::LedBank;
use crate::relay::PulseController;
use crate::sim::{bits_of, Board, Line, RecordingBus, SimPin};

type SimPanel = Panel<
    Mcp3008<SimPin, SimPin, SimPin, SimPin>,
    Hc595<SimPin, SimPin, SimPin>,
    PulseController<SimPin>,
    LedBank<SimPin>,
>;

fn build_panel(board: &Board, config: PanelConfig) -> SimPanel {
    let adc = Mcp3008::new(
        board.pin(Line::AdcClk),
        board.pin(Line::AdcDin),
        board.pin(Line::AdcDout),
        board.pin(Line::AdcCs),
    );
    let display = Hc595::new(
        board.pin(Line::Ds),
        board.pin(Line::Shcp),
        board.pin(Line::Stcp),
    )
    .unwrap();
    let relays =
        PulseController::new(core::array::from_fn(|i| board.pin(Line::Relay(i as u8)))).unwrap();
    let leds = LedBank::new(core::array::from_fn(|i| board.pin(Line::Led(i as u8)))).unwrap();

    Panel::new(config, adc, display, relays, leds)
}

fn glyph(index: u8) -> Glyph {
    Glyph::new(index).unwrap()
}

fn frame_bits(units: u8, tens: u8, dark: bool) -> Vec<bool> {
    let mut bits = bits_of(pattern_for(glyph(units)));
    if dark {
        bits[DECIMAL_POINT_BIT] = true;
    }
    bits.extend(bits_of(pattern_for(glyph(tens))));
    bits
}

fn target(channel: u8, direction: u8) -> ChannelTarget {
    ChannelTarget::new(channel, direction).unwrap()
}

#[test]
fn test_second_47_in_the_dark() {
    let board = Board::new();
    board.set_adc_value(6, 230);
    let mut panel = build_panel(&board, PanelConfig::default());
    let clock = ManualClock::new(47_000);
    let mut bus = RecordingBus::default();

    panel.tick(&clock, &mut bus).unwrap();
    clock.advance(50);
    panel.run_due(clock.now_ms(), &mut bus).unwrap();

    let frames = board.latched_frames();
    assert_eq!(frames.len(), 1);

    // Units 7 = [1,1,0,0,0,1,0,0] with the decimal point forced on
    assert_eq!(
        &frames[0][..8],
        &[true, true, false, false, true, true, false, false]
    );
    // Tens 4 = [1,0,1,1,0,1,0,0]
    assert_eq!(
        &frames[0][8..],
        &[true, false, true, true, false, true, false, false]
    );
}

#[test]
fn test_second_47_in_daylight() {
    let board = Board::new();
    board.set_adc_value(6, 100);
    let mut panel = build_panel(&board, PanelConfig::default());
    let clock = ManualClock::new(47_000);
    let mut bus = RecordingBus::default();

    panel.tick(&clock, &mut bus).unwrap();
    panel.run_due(clock.now_ms() + 50, &mut bus).unwrap();

    assert_eq!(board.latched_frames(), [frame_bits(7, 4, false)]);
}

#[test]
fn test_dark_reading_drives_indicator() {
    let board = Board::new();
    board.set_adc_values([1, 2, 3, 4, 5, 6, 230, 8]);
    let mut panel = build_panel(&board, PanelConfig::default());
    let clock = ManualClock::new(0);
    let mut bus = RecordingBus::default();
    board.clear_log();

    let report = panel.tick(&clock, &mut bus).unwrap();
    assert!(report.dark);
    assert_eq!(report.samples, [1, 2, 3, 4, 5, 6, 230, 8]);

    assert_eq!(board.writes(Line::Led(2)), [true]);
    let led_events: Vec<_> = bus
        .broadcasts()
        .into_iter()
        .filter(|event| event.topic() == Topic::LedStatus)
        .collect();
    assert_eq!(led_events, [PanelEvent::led(LedId::DARK_INDICATOR, true)]);
}

#[test]
fn test_tick_samples_channels_in_order() {
    let board = Board::new();
    board.set_adc_values([100, 200, 300, 400, 500, 600, 700, 800]);
    let mut panel = build_panel(&board, PanelConfig::default());
    let clock = ManualClock::new(0);
    let mut bus = RecordingBus::default();

    panel.tick(&clock, &mut bus).unwrap();

    let expected: Vec<u8> = (0..8).map(|ch| 0b11000 | ch).collect();
    assert_eq!(board.adc_commands(), expected);

    let readings: Vec<_> = bus
        .broadcasts()
        .into_iter()
        .filter_map(|event| match event {
            PanelEvent::Analog(reading) => Some((reading.channel.index(), reading.value)),
            _ => None,
        })
        .collect();
    assert_eq!(
        readings,
        [(0, 100), (1, 200), (2, 300), (3, 400), (4, 500), (5, 600), (6, 700), (7, 800)]
    );
}

#[test]
fn test_pulse_scenario() {
    let board = Board::new();
    let mut panel = build_panel(&board, PanelConfig::default());
    let mut bus = RecordingBus::default();
    let t = target(2, 1);
    board.clear_log();

    panel.pulse(10_000, t, &mut bus).unwrap();
    assert_eq!(board.log(), [(Line::Relay(3), true)]);
    assert_eq!(bus.broadcasts(), [PanelEvent::channel(t, Level::High)]);

    // Second pulse on the same line 100 ms later
    panel.pulse(10_100, t, &mut bus).unwrap();

    panel.run_due(10_499, &mut bus).unwrap();
    assert!(board.level(Line::Relay(3)));

    panel.run_due(10_500, &mut bus).unwrap();
    assert!(!board.level(Line::Relay(3)));

    panel.run_due(10_600, &mut bus).unwrap();
    assert_eq!(board.writes(Line::Relay(3)), [true, true, false, false]);
    assert_eq!(
        bus.broadcasts(),
        [
            PanelEvent::channel(t, Level::High),
            PanelEvent::channel(t, Level::High),
            PanelEvent::channel(t, Level::Low),
            PanelEvent::channel(t, Level::Low),
        ]
    );

    // No other relay line moved
    for i in (0..8).filter(|i| *i != 3) {
        assert!(board.writes(Line::Relay(i)).is_empty());
    }
}

#[test]
fn test_slow_shifting_keeps_frames_whole() {
    let board = Board::new();
    let mut config = PanelConfig::default();
    // A full frame takes 1.6 s, longer than the tick period. Validation
    // rejects this timing; the panel must still cope with it.
    config.timing.shift_step_ms = 100;
    let mut panel = build_panel(&board, config);
    let clock = ManualClock::new(8_000);
    let mut bus = RecordingBus::default();

    panel.tick(&clock, &mut bus).unwrap();
    for _ in 0..10 {
        clock.advance(100);
        panel.run_due(clock.now_ms(), &mut bus).unwrap();
    }

    // Second 9 arrives while second 8 is still shifting
    panel.tick(&clock, &mut bus).unwrap();
    for _ in 0..40 {
        clock.advance(100);
        panel.run_due(clock.now_ms(), &mut bus).unwrap();
    }

    assert_eq!(
        board.latched_frames(),
        [frame_bits(8, 0, false), frame_bits(9, 0, false)]
    );
    assert_eq!(board.rising_edges(Line::Shcp), 32);
    assert_eq!(panel.next_deadline(), None);
}

#[test]
fn test_slow_shifting_never_skips_sampling() {
    let board = Board::new();
    board.set_adc_values([1, 2, 3, 4, 5, 6, 230, 8]);
    let mut config = PanelConfig::default();
    config.timing.shift_step_ms = 100;
    let mut panel = build_panel(&board, config);
    let clock = ManualClock::new(0);
    let mut bus = RecordingBus::default();

    let mut dropped = 0;
    for _ in 0..10 {
        bus.events.clear();
        let report = panel.tick(&clock, &mut bus).unwrap();
        if report.display.is_err() {
            dropped += 1;
        }

        // Every channel and the indicator, whatever happened to the frame
        assert_eq!(report.samples, [1, 2, 3, 4, 5, 6, 230, 8]);
        assert_eq!(bus.broadcasts().len(), 9);

        for _ in 0..10 {
            clock.advance(100);
            panel.run_due(clock.now_ms(), &mut bus).unwrap();
        }
    }
    assert!(dropped > 0);

    // Let the last queued frames drain
    for _ in 0..40 {
        clock.advance(100);
        panel.run_due(clock.now_ms(), &mut bus).unwrap();
    }

    // Accepted frames all latched whole, dropped ones never touched the wire
    let frames = board.latched_frames();
    assert_eq!(frames.len(), 10 - dropped);
    assert!(frames.iter().all(|frame| frame.len() == 16));
    assert_eq!(board.rising_edges(Line::Shcp), 16 * frames.len());
}

#[test]
fn test_pulse_flood_keeps_display_and_sampling_alive() {
    let board = Board::new();
    board.set_adc_value(6, 230);
    let mut panel = build_panel(&board, PanelConfig::default());
    let clock = ManualClock::new(0);
    let mut bus = RecordingBus::default();

    // Remote side hammers one relay faster than it releases
    while panel
        .handle(0, PanelCommand::Pulse(target(1, 1)), &mut bus)
        .is_ok()
    {}

    for second in 0..10u64 {
        clock.set(second * 1000);
        panel.run_due(clock.now_ms(), &mut bus).unwrap();
        bus.events.clear();

        let report = panel.tick(&clock, &mut bus).unwrap();
        assert!(report.display.is_ok(), "second {}", second);
        assert_eq!(bus.broadcasts().len(), 9);

        clock.advance(50);
        panel.run_due(clock.now_ms(), &mut bus).unwrap();
    }

    let frames = board.latched_frames();
    assert_eq!(frames.len(), 10);
    assert_eq!(frames[9], frame_bits(9, 0, true));
    assert!(!board.level(Line::Relay(1)));
}

#[test]
fn test_commands_from_the_wire() {
    let board = Board::new();
    let mut panel = build_panel(&board, PanelConfig::default());
    let mut bus = RecordingBus::default();

    let commands = [
        PanelCommand::Pulse(target(4, 0)),
        PanelCommand::Led {
            led: LedId::new(0).unwrap(),
            action: pharos_protocol::LedAction::On,
        },
    ];

    let mut parser = FrameParser::new();
    for command in commands {
        let bytes = command.to_frame().unwrap().encode_to_vec().unwrap();
        let frame: Frame = parser.feed_bytes(&bytes).unwrap().unwrap();
        let decoded = PanelCommand::from_frame(&frame).unwrap();
        panel.handle(0, decoded, &mut bus).unwrap();
    }

    assert!(board.level(Line::Relay(6)));
    assert!(board.level(Line::Led(0)));

    panel.run_due(500, &mut bus).unwrap();
    assert!(!board.level(Line::Relay(6)));
}

#[test]
fn test_light_channel_follows_config() {
    let board = Board::new();
    board.set_adc_values([0, 0, 900, 0, 0, 0, 0, 0]);
    let mut config = PanelConfig::default();
    config.light_sensor.channel = AdcChannel::new(2).unwrap();
    config.light_sensor.indicator_led = LedId::new(0).unwrap();
    let mut panel = build_panel(&board, config);
    let clock = ManualClock::new(0);
    let mut bus = RecordingBus::default();

    let report = panel.tick(&clock, &mut bus).unwrap();
    assert!(report.dark);
    assert!(board.level(Line::Led(0)));
    assert!(!board.level(Line::Led(2)));

    // Indicator follows the light channel reading
    let events = bus.broadcasts();
    assert_eq!(events[2].topic(), Topic::Analog(AdcChannel::new(2).unwrap()));
    assert_eq!(events[3], PanelEvent::led(LedId::new(0).unwrap(), true));
}
