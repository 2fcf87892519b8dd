use smart_leds::RGB8;

const fn rgb(r: u8, g: u8, b: u8) -> RGB8 {
    RGB8 { r, g, b }
}

pub const OFF: RGB8 = rgb(0x00, 0x00, 0x00);
pub const WHITE: RGB8 = rgb(0xFF, 0xFF, 0xFF);
pub const RED: RGB8 = rgb(0xFF, 0x00, 0x00);
pub const GREEN: RGB8 = rgb(0x00, 0xFF, 0x00);
pub const BLUE: RGB8 = rgb(0x00, 0x00, 0xFF);
pub const CYAN: RGB8 = rgb(0x00, 0xFF, 0xFF);
pub const DARK_RED: RGB8 = rgb(0x28, 0x00, 0x00);
pub const ORANGE: RGB8 = rgb(0xFF, 0x28, 0x00);
pub const YELLOW: RGB8 = rgb(0xFF, 0xE0, 0x00);
pub const PURPLE: RGB8 = rgb(0x80, 0x00, 0xFF);
pub const OFF_BLUE: RGB8 = rgb(0x00, 0x80, 0xFF);
