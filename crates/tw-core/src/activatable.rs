/// Something that can be switched on and off.
///
/// Objects and effects compose an [`Activation`] flag and forward to it. An
/// inactive entity stays registered but is skipped by the tick dispatch.
pub trait Activatable {
    /// Returns `true` if this entity currently takes part in ticks.
    fn is_active(&self) -> bool;

    /// Set the active flag directly.
    fn set_active(&mut self, active: bool);

    /// Mark this entity as active.
    fn activate(&mut self) {
        self.set_active(true);
    }

    /// Mark this entity as inactive.
    fn deactivate(&mut self) {
        self.set_active(false);
    }
}

/// A plain active flag, meant to be embedded in larger state structs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation(bool);

impl Activation {
    /// Create a flag with the given initial state.
    pub const fn new(active: bool) -> Self {
        Self(active)
    }
}

impl Default for Activation {
    fn default() -> Self {
        Self(true)
    }
}

impl Activatable for Activation {
    fn is_active(&self) -> bool {
        self.0
    }

    fn set_active(&mut self, active: bool) {
        self.0 = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_defaults_to_active() {
        assert!(Activation::default().is_active());
    }

    #[test]
    fn activate_and_deactivate_toggle() {
        let mut flag = Activation::new(false);
        assert!(!flag.is_active());
        flag.activate();
        assert!(flag.is_active());
        flag.deactivate();
        assert!(!flag.is_active());
        // Repeating is harmless
        flag.deactivate();
        assert!(!flag.is_active());
    }
}
