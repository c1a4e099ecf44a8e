use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    command::{Bits, Command, RegisterSelection},
    sender::SendCommand,
    utils::BitOps,
};

/// Settle time with the enable line low, before the latch edge
pub const ENABLE_SETTLE_US: u32 = 1;
/// Minimum width of the enable pulse the controller needs to latch a nibble
pub const ENABLE_PULSE_WIDTH_US: u32 = 1;
/// Worst-case ordinary instruction execution time, waited after every
/// nibble so the controller is ready for the next one
pub const EXECUTION_WAIT_US: u32 = 100;

/// 4-bit parallel sender: one register-select line, one enable line, and
/// the four data lines DB4..=DB7.
///
/// Every full byte crosses the bus as two nibble writes, most significant
/// nibble first, each latched by one enable pulse.
pub struct ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    rs_pin: ControlPin,
    en_pin: ControlPin,
    db_pins: [DBPin; 4],
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    /// Bind the five pins; this is the only place the pin assignment is set
    pub fn new(
        rs: ControlPin,
        en: ControlPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            en_pin: en,
            db_pins: [db4, db5, db6, db7],
        }
    }

    fn push_bits(&mut self, raw_bits: u8) {
        self.db_pins
            .iter_mut()
            .enumerate()
            .for_each(|(index, pin)| {
                if raw_bits.bit_is_set(index as u8) {
                    pin.set_high().ok().unwrap();
                } else {
                    pin.set_low().ok().unwrap();
                }
            });
    }

    // one latch cycle; the data lines must already carry the nibble,
    // the controller samples them on this pulse
    fn pulse_enable(&mut self, delayer: &mut impl DelayNs) {
        self.en_pin.set_low().ok().unwrap();
        delayer.delay_us(ENABLE_SETTLE_US);
        self.en_pin.set_high().ok().unwrap();
        delayer.delay_us(ENABLE_PULSE_WIDTH_US);
        self.en_pin.set_low().ok().unwrap();
        delayer.delay_us(EXECUTION_WAIT_US);
    }

    fn write_nibble(&mut self, raw_bits: u8, delayer: &mut impl DelayNs) {
        assert!(raw_bits < 2u8.pow(4), "data is greater than 4 bits");

        self.push_bits(raw_bits);
        self.pulse_enable(delayer);
    }
}

impl<ControlPin, DBPin, Delayer> SendCommand<Delayer> for ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
    Delayer: DelayNs,
{
    fn send(&mut self, command: Command, delayer: &mut Delayer) {
        match command.register_selection() {
            RegisterSelection::Command => {
                self.rs_pin.set_low().ok().unwrap();
            }
            RegisterSelection::Data => {
                self.rs_pin.set_high().ok().unwrap();
            }
        }

        match command.data() {
            Bits::Bit4(raw_bits) => {
                self.write_nibble(raw_bits, delayer);
            }
            Bits::Bit8(raw_bits) => {
                self.write_nibble(raw_bits >> 4, delayer);
                self.write_nibble(raw_bits & 0b1111, delayer);
            }
        }
    }
}
