//! The high-level [`Lcd`] driver
//!
//! Every method is a self-contained bus transaction: it updates the shadow
//! state where one exists, funnels through the sender, and blocks through
//! the protocol delays before returning. There are no partial-failure or
//! retry states, the bus is fire-and-forget.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;
use log::warn;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, ShiftType, State},
    sender::SendCommand,
    state::LcdState,
};

mod init;

pub use init::Config;

/// Execution time of the clear and return-home commands, far longer than
/// ordinary instructions
const CLEAR_HOME_WAIT_US: u32 = 2_000;

/// Capacity of the numeric text buffer; an f32 rendered with 4 fraction
/// digits needs at most 46 bytes
const NUM_TEXT_CAPACITY: usize = 48;

/// Driver for one display.
///
/// All configuration and register shadow lives here, so multiple displays
/// (or a display and a test double) can coexist without any process-wide
/// state. Created with [`Lcd::new`], which also initializes the hardware.
pub struct Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    state: LcdState,
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Clear the whole display and move the cursor to the origin
    pub fn clear_display(&mut self) {
        self.sender
            .send(CommandSet::ClearDisplay.into(), self.delayer);
        self.delayer.delay_us(CLEAR_HOME_WAIT_US);
    }

    /// Move the cursor to the origin and undo any display shift
    pub fn return_home(&mut self) {
        self.sender.send(CommandSet::ReturnHome.into(), self.delayer);
        self.delayer.delay_us(CLEAR_HOME_WAIT_US);
    }

    /// Turn the whole display on or off; DDRAM content is kept
    pub fn set_display_state(&mut self, display: State) {
        self.state.set_display_state(display);
        self.send_display_control();
    }

    #[allow(missing_docs)]
    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    /// Toggle the entire display on and off
    pub fn toggle_display(&mut self) {
        match self.get_display_state() {
            State::Off => self.set_display_state(State::On),
            State::On => self.set_display_state(State::Off),
        }
    }

    /// Turn the underline cursor on or off
    pub fn set_cursor_state(&mut self, cursor: State) {
        self.state.set_cursor_state(cursor);
        self.send_display_control();
    }

    #[allow(missing_docs)]
    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    /// Turn the blinking block cursor on or off
    pub fn set_cursor_blink_state(&mut self, blink: State) {
        self.state.set_cursor_blink(blink);
        self.send_display_control();
    }

    #[allow(missing_docs)]
    pub fn get_cursor_blink_state(&self) -> State {
        self.state.get_cursor_blink()
    }

    /// Set the text flow direction
    pub fn set_direction(&mut self, dir: MoveDirection) {
        self.state.set_direction(dir);
        self.send_entry_mode();
    }

    #[allow(missing_docs)]
    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    /// Autoscroll: with [`ShiftType::CursorAndDisplay`] the display shifts
    /// along with every write once the cursor passes the visible edge
    pub fn set_shift_type(&mut self, shift: ShiftType) {
        self.state.set_shift_type(shift);
        self.send_entry_mode();
    }

    #[allow(missing_docs)]
    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    /// Shift the entire display one cell, leaving DDRAM untouched.
    ///
    /// This is stateless by controller semantics: a display shift is not a
    /// mode, the entry-mode bits stay as they are.
    pub fn shift_display(&mut self, dir: MoveDirection) {
        self.sender.send(
            CommandSet::CursorOrDisplayShift(ShiftType::CursorAndDisplay, dir).into(),
            self.delayer,
        );
    }

    /// Move the cursor to a (column, row) position.
    ///
    /// An out-of-range row is clamped silently to the last line. The column
    /// is not validated and can address DDRAM outside the visible window, a
    /// quirk of the raw address command that is kept for compatibility; it
    /// is logged so a misbehaving display can be traced.
    pub fn set_cursor_pos(&mut self, pos: (u8, u8)) {
        if pos.0 >= self.state.get_line_capacity() {
            warn!(
                "column {} is outside DDRAM, the address will wrap on the controller",
                pos.0
            );
        }

        let addr = self.state.ddram_addr(pos);
        self.sender.send(CommandSet::SetDDRAM(addr).into(), self.delayer);
    }

    #[allow(missing_docs)]
    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    #[allow(missing_docs)]
    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    /// Write one raw byte to the current position
    pub fn write_byte_to_cur(&mut self, byte: u8) {
        self.sender
            .send(CommandSet::WriteDataToRAM(byte).into(), self.delayer);
    }

    /// write [char] to current position
    /// In this implementation, character only support
    /// from ASCII 0x20 (white space) to ASCII 0x7D (`}`)
    pub fn write_char_to_cur(&mut self, char: char) {
        // map char out side of ASCII 0x20 and 0x7D to full rectangle
        let out_byte = match char.is_ascii() {
            true if (0x20 <= char as u8) && (char as u8 <= 0x7D) => char as u8,
            _ => 0xFF,
        };

        self.write_byte_to_cur(out_byte);
    }

    /// Write a string to the current position, one character at a time
    pub fn write_str_to_cur(&mut self, str: &str) {
        str.chars().for_each(|char| self.write_char_to_cur(char));
    }

    /// Render an integer as decimal text and write it
    pub fn write_int_to_cur(&mut self, value: i32) {
        let mut buffer = itoa::Buffer::new();
        self.write_str_to_cur(buffer.format(value));
    }

    /// Render a float with fixed 4 decimal places and write it
    pub fn write_float_to_cur(&mut self, value: f32) {
        let mut text: String<NUM_TEXT_CAPACITY> = String::new();
        // cannot overflow, the capacity covers the widest f32 rendering
        write!(text, "{:.4}", value).unwrap();
        self.write_str_to_cur(&text);
    }

    fn send_display_control(&mut self) {
        self.sender.send(
            CommandSet::DisplayOnOff {
                display: self.state.get_display_state(),
                cursor: self.state.get_cursor_state(),
                cursor_blink: self.state.get_cursor_blink(),
            }
            .into(),
            self.delayer,
        );
    }

    fn send_entry_mode(&mut self) {
        self.sender.send(
            CommandSet::EntryModeSet(self.state.get_direction(), self.state.get_shift_type())
                .into(),
            self.delayer,
        );
    }
}
