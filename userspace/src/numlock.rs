use crate::layer::Layer;

/// Lock LEDs as last reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HostLeds {
    pub num_lock: bool,
    pub caps_lock: bool,
    pub scroll_lock: bool,
}

/// Keeps the host's numlock in step with the numpad overlay.
///
/// Both methods return `true` when numlock has to be tapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NumlockSync {
    numpad_active: bool,
    startup_pending: bool,
}

impl NumlockSync {
    pub const fn new(startup_numlock: bool) -> Self {
        Self {
            numpad_active: false,
            startup_pending: startup_numlock,
        }
    }

    /// Numlock goes on when the numpad layer becomes active and off when it is
    /// left. Nothing happens while the layer does not change.
    pub fn on_layer_change(&mut self, layer: Layer, host_num_lock: bool) -> bool {
        let active = layer == Layer::Fn2;
        if active == self.numpad_active {
            return false;
        }
        self.numpad_active = active;
        host_num_lock != active
    }

    /// The host's lock state is unknown until its first LED report, so the
    /// startup numlock is applied here rather than at boot.
    pub fn on_host_leds(&mut self, host_num_lock: bool) -> bool {
        if !self.startup_pending {
            return false;
        }
        self.startup_pending = false;
        !host_num_lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_numpad_turns_numlock_on() {
        let mut sync = NumlockSync::new(false);
        assert!(sync.on_layer_change(Layer::Fn2, false));
        // Already on: nothing to tap.
        let mut sync = NumlockSync::new(false);
        assert!(!sync.on_layer_change(Layer::Fn2, true));
    }

    #[test]
    fn leaving_numpad_turns_numlock_off() {
        let mut sync = NumlockSync::new(false);
        sync.on_layer_change(Layer::Fn2, false);
        assert!(sync.on_layer_change(Layer::Base, true));
        assert!(!sync.on_layer_change(Layer::Fn1, false));
    }

    #[test]
    fn other_layers_leave_numlock_alone() {
        let mut sync = NumlockSync::new(false);
        assert!(!sync.on_layer_change(Layer::Fn1, true));
        assert!(!sync.on_layer_change(Layer::Base, true));
        assert!(!sync.on_layer_change(Layer::Fn4, false));
    }

    #[test]
    fn startup_numlock_fires_once() {
        let mut sync = NumlockSync::new(true);
        assert!(sync.on_host_leds(false));
        assert!(!sync.on_host_leds(false));

        let mut sync = NumlockSync::new(true);
        assert!(!sync.on_host_leds(true));
        assert!(!sync.on_host_leds(false));

        let mut sync = NumlockSync::new(false);
        assert!(!sync.on_host_leds(false));
    }
}
