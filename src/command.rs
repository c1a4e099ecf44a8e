//! Instruction encoding
//!
//! A [`CommandSet`] value is a datasheet-level command; it converts into a
//! raw [`Command`] (register selection plus the bits to put on the bus),
//! which is what a [`SendCommand`](crate::sender::SendCommand) implementor
//! consumes.

use crate::utils::BitOps;

/// Every instruction the driver can issue, in datasheet terms
#[derive(Clone, Copy)]
pub enum CommandSet {
    /// Wipe DDRAM and reset the address counter to 0
    ClearDisplay,
    /// Reset the address counter and undo any display shift
    ReturnHome,
    /// Write direction, and whether the display shifts along with each write
    EntryModeSet(MoveDirection, ShiftType),
    /// Display / cursor / cursor-blink on-off control
    DisplayOnOff {
        /// Whole display on or off (DDRAM content is kept)
        display: State,
        /// Underline cursor on or off
        cursor: State,
        /// Blinking block cursor on or off
        cursor_blink: State,
    },
    /// Shift the cursor or the whole display, without touching DDRAM
    CursorOrDisplayShift(ShiftType, MoveDirection),
    // the next two are not commands from the datasheet,
    // they are the single-nibble writes of the "initializing by instruction"
    // sequence, named so the init code reads like the flowchart
    /// High half of an 8-bit function set (0b0011), repeated three times to
    /// resynchronize a controller that may have powered up in either bus mode
    SyncFunctionSet,
    /// The lone nibble (0b0010) that finally commits the controller to the
    /// 4-bit bus
    HalfFunctionSet,
    /// Bus width, line count and font; bus width is fixed to 4-bit here
    FunctionSet(LineMode, Font),
    /// Move the address counter to a DDRAM address
    SetDDRAM(u8),
    /// Write one byte to RAM at the current address counter
    WriteDataToRAM(u8),
}

/// Text flow direction of the entry mode
#[derive(Clone, Copy, PartialEq, Default)]
pub enum MoveDirection {
    /// Cursor moves left after each write
    RightToLeft,
    /// Cursor moves right after each write
    #[default]
    LeftToRight,
}

/// What a shift applies to; in the entry mode this is the autoscroll flag
#[derive(Clone, Copy, PartialEq, Default)]
pub enum ShiftType {
    /// Only the cursor moves
    #[default]
    CursorOnly,
    /// The whole display moves along
    CursorAndDisplay,
}

/// On/off state of a display-control flag
#[derive(Clone, Copy, PartialEq, Default)]
pub enum State {
    /// Flag cleared
    Off,
    /// Flag set
    #[default]
    On,
}

/// Line count of the panel
#[derive(Clone, Copy, PartialEq, Default)]
pub enum LineMode {
    /// Single-line panel
    OneLine,
    /// Two-line panel, the common 16x2
    #[default]
    TwoLine,
}

/// Character font
#[derive(Clone, Copy, PartialEq, Default)]
pub enum Font {
    /// 5x8 dot matrix
    #[default]
    Font5x8,
    /// 5x11 dot matrix, one-line panels only
    Font5x11,
}

/// A raw write transaction: register selection plus the bits for the bus
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum RegisterSelection {
    Command,
    Data,
}

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum Bits {
    Bit4(u8),
    Bit8(u8),
}

impl Command {
    pub(crate) fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    pub(crate) fn register_selection(&self) -> RegisterSelection {
        self.rs
    }

    pub(crate) fn data(&self) -> Bits {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => {
                let raw_bits: u8 = 0b0000_0001;
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::ReturnHome => {
                let raw_bits: u8 = 0b0000_0010;
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits = 0b0000_1000;

                match display {
                    State::Off => raw_bits.clear_bit(2),
                    State::On => raw_bits.set_bit(2),
                };
                match cursor {
                    State::Off => raw_bits.clear_bit(1),
                    State::On => raw_bits.set_bit(1),
                };
                match cursor_blink {
                    State::Off => raw_bits.clear_bit(0),
                    State::On => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits = 0b0001_0000;

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(3),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(3),
                };

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(2),
                    MoveDirection::LeftToRight => raw_bits.set_bit(2),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::SyncFunctionSet => {
                Self::new(RegisterSelection::Command, Bits::Bit4(0b0011))
            }

            CommandSet::HalfFunctionSet => {
                Self::new(RegisterSelection::Command, Bits::Bit4(0b0010))
            }

            CommandSet::FunctionSet(line, font) => {
                // bit 4 stays clear, this driver only speaks the 4-bit bus
                let mut raw_bits = 0b0010_0000;

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x11 => raw_bits.set_bit(2),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::SetDDRAM(addr) => {
                // the address is ORed below the command bit, exactly the bus
                // format; an out-of-range address is not rejected, it lands
                // in the low 7 bits as-is
                let raw_bits = 0b1000_0000 | addr;
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::WriteDataToRAM(data) => {
                Self::new(RegisterSelection::Data, Bits::Bit8(data))
            }
        }
    }
}
