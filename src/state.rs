use crate::command::{Font, LineMode, MoveDirection, ShiftType, State};

/// DDRAM base address of each display row.
///
/// Only the first `line count` entries are reachable; on the common 2-line
/// panel the last two exist for the address map but are clamped away.
pub(crate) const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x10, 0x50];

/// Shadow of everything the driver has commanded.
///
/// The hardware registers cannot be read back on a write-only bus, so this
/// is the single source of truth for the function, display-control and
/// entry-mode settings. Every toggle re-encodes the full register from here.
pub(crate) struct LcdState {
    line: LineMode,
    font: Font,
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
}

impl Default for LcdState {
    fn default() -> Self {
        // the init defaults: display on with no cursor or blink,
        // text flowing left to right, no autoscroll
        Self {
            line: LineMode::default(),
            font: Font::default(),
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            shift_type: ShiftType::CursorOnly,
        }
    }
}

impl LcdState {
    pub(crate) fn get_line_mode(&self) -> LineMode {
        self.line
    }

    pub(crate) fn set_line_mode(&mut self, line: LineMode) {
        self.line = line;
    }

    pub(crate) fn get_line_count(&self) -> u8 {
        match self.line {
            LineMode::OneLine => 1,
            LineMode::TwoLine => 2,
        }
    }

    /// DDRAM cells per row, which is wider than the 16 visible columns
    pub(crate) fn get_line_capacity(&self) -> u8 {
        match self.line {
            LineMode::OneLine => 80,
            LineMode::TwoLine => 40,
        }
    }

    pub(crate) fn get_font(&self) -> Font {
        self.font
    }

    pub(crate) fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub(crate) fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub(crate) fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub(crate) fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_shift_type(&mut self, shift: ShiftType) {
        self.shift_type = shift;
    }

    /// Resolve a (column, row) position to a DDRAM address.
    ///
    /// The row is clamped silently to the last addressable row, a caller
    /// cannot tell a clamp from an exact hit. The column is deliberately not
    /// range-checked, whatever lands in the low 7 bits of the address
    /// command goes out on the bus.
    pub(crate) fn ddram_addr(&self, pos: (u8, u8)) -> u8 {
        let max_row = (ROW_OFFSETS.len() as u8 - 1).min(self.get_line_count() - 1);
        let row = pos.1.min(max_row);

        ROW_OFFSETS[row as usize].wrapping_add(pos.0)
    }
}
