use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, ShiftType, State},
    lcd::Lcd,
    sender::SendCommand,
    state::LcdState,
};

/// Power-on stabilization wait, the datasheet wants at least 40 ms
const POWER_ON_WAIT_US: u32 = 50_000;
/// Wait after each of the first two sync writes, at least 4.1 ms
const SYNC_RETRY_WAIT_US: u32 = 5_000;
/// Settle after the third sync write
const SYNC_SETTLE_WAIT_US: u32 = 150;

/// [`Config`] is the init config of a [`Lcd`]
///
/// The defaults match the plain power-on setup: 2 lines, 5x8 font, display
/// on with no cursor or blink, text left to right, no autoscroll.
#[derive(Default)]
pub struct Config {
    state: LcdState,
}

#[allow(missing_docs)]
impl Config {
    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    pub fn set_line_mode(mut self, line: LineMode) -> Self {
        self.state.set_line_mode(line);
        self
    }

    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    pub fn set_font(mut self, font: Font) -> Self {
        self.state.set_font(font);
        self
    }

    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    pub fn set_display_state(mut self, display: State) -> Self {
        self.state.set_display_state(display);
        self
    }

    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    pub fn set_cursor_state(mut self, cursor: State) -> Self {
        self.state.set_cursor_state(cursor);
        self
    }

    pub fn get_cursor_blink(&self) -> State {
        self.state.get_cursor_blink()
    }

    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.state.set_cursor_blink(blink);
        self
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    pub fn set_direction(mut self, dir: MoveDirection) -> Self {
        self.state.set_direction(dir);
        self
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    pub fn set_shift_type(mut self, shift: ShiftType) -> Self {
        self.state.set_shift_type(shift);
        self
    }
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, and init the LCD hardware.
    ///
    /// This must run exactly once before any other operation, and the delay
    /// minimums in it are load-bearing: undershooting them corrupts the
    /// controller state visibly instead of failing.
    pub fn new(sender: &'a mut Sender, delayer: &'b mut Delayer, config: Config) -> Self {
        let state = config.state;

        // "initializing by instruction", straight from the datasheet: the
        // controller may power up in either bus width, three repeated sync
        // nibbles land it in a known 8-bit state from which the half
        // function-set commits it to the 4-bit bus
        sender.delay_and_send(CommandSet::SyncFunctionSet.into(), delayer, POWER_ON_WAIT_US);
        sender.delay_and_send(
            CommandSet::SyncFunctionSet.into(),
            delayer,
            SYNC_RETRY_WAIT_US,
        );
        sender.delay_and_send(
            CommandSet::SyncFunctionSet.into(),
            delayer,
            SYNC_RETRY_WAIT_US,
        );
        sender.delay_and_send(
            CommandSet::HalfFunctionSet.into(),
            delayer,
            SYNC_SETTLE_WAIT_US,
        );

        // now the real function set, then the configured register values
        sender.send(
            CommandSet::FunctionSet(state.get_line_mode(), state.get_font()).into(),
            delayer,
        );

        sender.send(
            CommandSet::DisplayOnOff {
                display: state.get_display_state(),
                cursor: state.get_cursor_state(),
                cursor_blink: state.get_cursor_blink(),
            }
            .into(),
            delayer,
        );

        sender.send(CommandSet::ClearDisplay.into(), delayer);
        delayer.delay_us(super::CLEAR_HOME_WAIT_US);

        sender.send(
            CommandSet::EntryModeSet(state.get_direction(), state.get_shift_type()).into(),
            delayer,
        );

        Lcd {
            sender,
            delayer,
            state,
        }
    }
}
