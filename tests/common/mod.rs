//! Recording pin/delay backend.
//!
//! The driver's only real side effect is pin toggling and blocking waits,
//! so the tests substitute a backend that records every (pin, level) event
//! and every delay into one shared ordered trace, then assert on the trace.
//! Per-pin mocks cannot express cross-pin ordering, hence this hand-rolled
//! recorder.

#![allow(dead_code)]

use core::convert::Infallible;
use std::{cell::RefCell, rc::Rc};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};
use lcd16x2_driver::sender::ParallelSender;

// pin ids used by every test
pub const RS: u8 = 1;
pub const EN: u8 = 2;
pub const D4: u8 = 3;
pub const D5: u8 = 4;
pub const D6: u8 = 5;
pub const D7: u8 = 6;

pub const DATA_PINS: [u8; 4] = [D4, D5, D6, D7];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Pin { pin: u8, high: bool },
    Delay { us: u32 },
}

/// Shared trace all recorded pins and the recorded delayer append to
#[derive(Clone, Default)]
pub struct BusRecorder {
    events: Rc<RefCell<Vec<BusEvent>>>,
}

impl BusRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, pin: u8) -> RecordedPin {
        RecordedPin {
            pin,
            events: self.events.clone(),
        }
    }

    pub fn delayer(&self) -> RecordedDelay {
        RecordedDelay {
            events: self.events.clone(),
        }
    }

    /// Drain and return everything recorded so far
    pub fn take(&self) -> Vec<BusEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

pub struct RecordedPin {
    pin: u8,
    events: Rc<RefCell<Vec<BusEvent>>>,
}

impl ErrorType for RecordedPin {
    type Error = Infallible;
}

impl OutputPin for RecordedPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.events.borrow_mut().push(BusEvent::Pin {
            pin: self.pin,
            high: false,
        });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.events.borrow_mut().push(BusEvent::Pin {
            pin: self.pin,
            high: true,
        });
        Ok(())
    }
}

pub struct RecordedDelay {
    events: Rc<RefCell<Vec<BusEvent>>>,
}

impl RecordedDelay {
    fn record(&mut self, us: u32) {
        self.events.borrow_mut().push(BusEvent::Delay { us });
    }
}

impl DelayNs for RecordedDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.record(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(ms * 1_000);
    }
}

/// A sender wired to the recorder with the canonical pin ids
pub fn recorded_sender(bus: &BusRecorder) -> ParallelSender<RecordedPin, RecordedPin> {
    ParallelSender::new(
        bus.pin(RS),
        bus.pin(EN),
        bus.pin(D4),
        bus.pin(D5),
        bus.pin(D6),
        bus.pin(D7),
    )
}

/// One latched nibble, recovered from the trace at an enable rising edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nibble {
    pub data_mode: bool,
    pub value: u8,
    /// Sum of all delays since the previous rising edge (or trace start)
    pub delay_before_us: u32,
}

/// Replay the trace and capture the data-line levels at every enable
/// rising edge, which is when the controller latches them
pub fn decode_nibbles(events: &[BusEvent]) -> Vec<Nibble> {
    let mut levels = [false; 8];
    let mut delay_acc = 0u32;
    let mut nibbles = Vec::new();

    for event in events {
        match *event {
            BusEvent::Delay { us } => delay_acc += us,
            BusEvent::Pin { pin, high } => {
                if pin == EN && high && !levels[EN as usize] {
                    let mut value = 0u8;
                    for (bit, &data_pin) in DATA_PINS.iter().enumerate() {
                        if levels[data_pin as usize] {
                            value |= 1 << bit;
                        }
                    }
                    nibbles.push(Nibble {
                        data_mode: levels[RS as usize],
                        value,
                        delay_before_us: delay_acc,
                    });
                    delay_acc = 0;
                }
                levels[pin as usize] = high;
            }
        }
    }

    nibbles
}

/// Pair up nibbles into the bytes that crossed the bus, asserting the
/// halves of each byte agree on the register-select mode
pub fn decode_bytes(nibbles: &[Nibble]) -> Vec<(bool, u8)> {
    assert!(
        nibbles.len() % 2 == 0,
        "byte stream must be an even number of nibbles"
    );

    nibbles
        .chunks(2)
        .map(|pair| {
            assert_eq!(
                pair[0].data_mode, pair[1].data_mode,
                "register select changed between the halves of a byte"
            );
            (pair[0].data_mode, (pair[0].value << 4) | pair[1].value)
        })
        .collect()
}

/// Assert every enable pulse in the trace has the required shape:
/// EN low, wait >= 1 us, EN high, wait >= 1 us, EN low, wait >= 100 us,
/// with nothing but delays inside the pulse.
pub fn verify_enable_pulses(events: &[BusEvent]) {
    let en_indices: Vec<usize> = events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| match event {
            BusEvent::Pin { pin, .. } if *pin == EN => Some(index),
            _ => None,
        })
        .collect();

    assert!(
        en_indices.len() % 3 == 0,
        "enable events must come in low/high/low triples"
    );

    for triple in en_indices.chunks(3) {
        let (low1, high, low2) = (triple[0], triple[1], triple[2]);

        assert_eq!(events[low1], BusEvent::Pin { pin: EN, high: false });
        assert_eq!(events[high], BusEvent::Pin { pin: EN, high: true });
        assert_eq!(events[low2], BusEvent::Pin { pin: EN, high: false });

        assert!(
            delays_only(&events[low1 + 1..high]) >= 1,
            "enable settle shorter than 1 us"
        );
        assert!(
            delays_only(&events[high + 1..low2]) >= 1,
            "enable pulse narrower than 1 us"
        );

        // after the falling edge, at least the worst-case execution time
        // must pass before any pin moves again
        let mut execution_wait = 0u32;
        for event in &events[low2 + 1..] {
            match *event {
                BusEvent::Delay { us } => execution_wait += us,
                BusEvent::Pin { .. } => break,
            }
        }
        assert!(
            execution_wait >= 100,
            "less than 100 us of execution wait after a pulse"
        );
    }
}

/// Sum a slice of events that must contain only delays
fn delays_only(events: &[BusEvent]) -> u32 {
    events
        .iter()
        .map(|event| match *event {
            BusEvent::Delay { us } => us,
            BusEvent::Pin { .. } => panic!("pin event inside an enable pulse: {event:?}"),
        })
        .sum()
}
