/// The user's layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    #[default]
    Base,
    Fn1,
    /// Numpad overlay.
    Fn2,
    Fn3,
    /// Game macros.
    Fn4,
}

/// Layers in the framework keymap: both base variants plus the four Fn layers.
pub const KEYMAP_LAYERS: usize = 6;

/// Keymap index of the base layer with the left Windows key removed. It is
/// made the default layer while the Windows key is locked.
pub const WIN_LOCK_LAYER: u8 = 1;

impl Layer {
    pub const ALL: [Layer; 5] = [Layer::Base, Layer::Fn1, Layer::Fn2, Layer::Fn3, Layer::Fn4];

    /// Maps a framework keymap index to the user layer it belongs to.
    pub const fn from_keymap_index(index: u8) -> Self {
        match index {
            2 => Layer::Fn1,
            3 => Layer::Fn2,
            4 => Layer::Fn3,
            5 => Layer::Fn4,
            _ => Layer::Base,
        }
    }

    pub const fn keymap_index(self) -> u8 {
        match self {
            Layer::Base => 0,
            Layer::Fn1 => 2,
            Layer::Fn2 => 3,
            Layer::Fn3 => 4,
            Layer::Fn4 => 5,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Layer::Base => Some(Layer::Fn1),
            Layer::Fn1 => Some(Layer::Fn2),
            Layer::Fn2 => Some(Layer::Fn3),
            Layer::Fn3 => Some(Layer::Fn4),
            Layer::Fn4 => None,
        }
    }

    pub const fn prev(self) -> Option<Self> {
        match self {
            Layer::Base => None,
            Layer::Fn1 => Some(Layer::Base),
            Layer::Fn2 => Some(Layer::Fn1),
            Layer::Fn3 => Some(Layer::Fn2),
            Layer::Fn4 => Some(Layer::Fn3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_lock_layer_reads_as_base() {
        assert_eq!(Layer::from_keymap_index(0), Layer::Base);
        assert_eq!(Layer::from_keymap_index(WIN_LOCK_LAYER), Layer::Base);
        assert_eq!(Layer::from_keymap_index(200), Layer::Base);
    }

    #[test]
    fn keymap_index_round_trips() {
        for layer in Layer::ALL {
            assert_eq!(Layer::from_keymap_index(layer.keymap_index()), layer);
            assert!((layer.keymap_index() as usize) < KEYMAP_LAYERS);
        }
    }

    #[test]
    fn stepping_stops_at_the_ends() {
        assert_eq!(Layer::Base.prev(), None);
        assert_eq!(Layer::Fn4.next(), None);
        assert_eq!(Layer::Fn2.next(), Some(Layer::Fn3));
        assert_eq!(Layer::Fn2.prev(), Some(Layer::Fn1));
    }
}
