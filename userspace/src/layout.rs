//! Switch matrix of the GMMK Pro rev1 ANSI.

pub const ROWS: usize = 11;
pub const COLS: usize = 8;

/// Number of switches, the encoder push included.
pub const KEY_COUNT: usize = 83;

/// Matrix coordinates `(row, col)` of every switch, in the order the keys read
/// on the board: top row left to right, then each row below.
#[rustfmt::skip]
pub const LAYOUT_POSITIONS: [(u8, u8); KEY_COUNT] = [
    // Esc, F1..F12, top-right key, encoder push
    (1, 3), (2, 6), (3, 6), (3, 1), (3, 3), (0, 7), (6, 3), (7, 1), (7, 6), (10, 6), (10, 7), (10, 3), (10, 5), (9, 7), (0, 1),
    // ` 1..0 - = Backspace, right column
    (1, 6), (1, 7), (2, 7), (3, 7), (4, 7), (4, 6), (5, 6), (5, 7), (6, 7), (7, 7), (8, 7), (8, 6), (6, 6), (10, 1), (6, 5),
    // Tab Q..P [ ] \, right column
    (1, 1), (1, 0), (2, 0), (3, 0), (4, 0), (4, 1), (5, 1), (5, 0), (6, 0), (7, 0), (8, 0), (8, 1), (6, 1), (10, 2), (1, 5),
    // Caps A..L ; ' Enter, right column
    (2, 1), (1, 2), (2, 2), (3, 2), (4, 2), (4, 3), (5, 3), (5, 2), (6, 2), (7, 2), (8, 2), (8, 3), (10, 4), (2, 5),
    // LShift Z..M , . / RShift Up, right column
    (0, 0), (1, 4), (2, 4), (3, 4), (4, 4), (4, 5), (5, 5), (5, 4), (6, 4), (7, 4), (8, 5), (9, 1), (3, 5), (7, 5),
    // LCtrl LWin LAlt Space RAlt Fn RCtrl Left Down Right
    (0, 6), (9, 0), (9, 3), (9, 4), (9, 5), (9, 2), (0, 4), (0, 3), (7, 3), (0, 5),
];

/// Left Windows key.
pub const WIN_KEY: (u8, u8) = (9, 0);

/// Matrix coordinates without a switch that the firmware presses itself to
/// drive layer actions the framework owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HiddenKey {
    LayerNext,
    LayerPrev,
    GuiUnlock,
    GuiLock,
}

impl HiddenKey {
    pub const fn position(self) -> (u8, u8) {
        match self {
            HiddenKey::LayerNext => (2, 3),
            HiddenKey::LayerPrev => (0, 2),
            HiddenKey::GuiUnlock => (8, 4),
            HiddenKey::GuiLock => (9, 6),
        }
    }
}
