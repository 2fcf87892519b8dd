use crate::keys::Modifiers;
use crate::layer::Layer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const fn from_clockwise(clockwise: bool) -> Self {
        if clockwise { Direction::Up } else { Direction::Down }
    }

    pub const fn is_up(self) -> bool {
        matches!(self, Direction::Up)
    }
}

/// What one encoder detent does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderCommand {
    StepLayer(Direction),
    Saturation(Direction),
    Hue(Direction),
    Brightness(Direction),
    Timeout(Direction),
    Volume(Direction),
}

/// Held modifiers pick the command, first match wins: left shift steps
/// layers, right shift saturation, right ctrl hue, right alt brightness.
/// Without any of them the encoder changes the idle timeout on `Fn1` and the
/// volume everywhere else.
pub fn resolve(mods: Modifiers, layer: Layer, clockwise: bool) -> EncoderCommand {
    let direction = Direction::from_clockwise(clockwise);
    if mods.contains(Modifiers::LSHIFT) {
        EncoderCommand::StepLayer(direction)
    } else if mods.contains(Modifiers::RSHIFT) {
        EncoderCommand::Saturation(direction)
    } else if mods.contains(Modifiers::RCTRL) {
        EncoderCommand::Hue(direction)
    } else if mods.contains(Modifiers::RALT) {
        EncoderCommand::Brightness(direction)
    } else if layer == Layer::Fn1 {
        EncoderCommand::Timeout(direction)
    } else {
        EncoderCommand::Volume(direction)
    }
}
