/*!
# 16x2 LCD Driver (HD44780 class, 4-bit parallel bus)

Basic Usage:

1. Initialize a "sender" <br/>
    The built-in [`sender::ParallelSender`] drives the five-line parallel
    interface (register-select, enable, DB4..=DB7).

    You can use it directly, or you can use any driver implemented
    [`sender::SendCommand`].
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`], and initialize the LCD hardware
<br/>
<br/>
3. use any methods provide by [`lcd::Lcd`] to control the LCD

The bus is write-only and open-loop: there is no busy-flag read-back, every
transmission is paced by the fixed worst-case delays from the datasheet.
The controller's RW line should be tied to ground.
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod lcd;
pub mod sender;
mod state;
pub mod utils;
