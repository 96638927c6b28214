/// Key that flips the debug overlay, matched case-insensitively.
pub const DEBUG_TOGGLE_KEY: &str = "f";

/// Debug overlay switch. Starts off and flips on every toggle key press
/// for as long as the renderer lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DebugToggle {
    #[default]
    Off,
    On,
}

impl DebugToggle {
    pub fn is_on(self) -> bool {
        self == DebugToggle::On
    }

    pub fn toggle(&mut self) {
        *self = match self {
            DebugToggle::Off => DebugToggle::On,
            DebugToggle::On => DebugToggle::Off,
        };
    }

    /// Returns `true` if the key was the toggle key.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key.eq_ignore_ascii_case(DEBUG_TOGGLE_KEY) {
            self.toggle();
            true
        } else {
            false
        }
    }
}
