//! Built-in sender
//! If you want to drive the bus some other way, you will need to implement
//! [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::command::Command;

mod parallel_sender;

pub use parallel_sender::ParallelSender;

/// [`SendCommand`] is the trait a sender should implement to communicate
/// with the hardware.
///
/// The protocol is write-only and open-loop: there is no busy-flag
/// read-back, so pacing is done purely with the delays baked into each
/// transmission. A sender must not return until the controller is
/// guaranteed ready for the next command.
pub trait SendCommand<Delayer: DelayNs> {
    /// Put one [`Command`] on the bus, blocking through all protocol delays
    fn send(&mut self, command: Command, delayer: &mut Delayer);

    /// Wait specific duration first, then send the command
    fn delay_and_send(&mut self, command: Command, delayer: &mut Delayer, delay_us: u32) {
        delayer.delay_us(delay_us);
        self.send(command, delayer);
    }
}
