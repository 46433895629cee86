use crate::error::MyResult;
use tracing::debug;
use tracing::warn;

/// A named, owned handle that can be released before its owner is dropped.
///
/// Releasing an empty slot does nothing, so unloading is safe to repeat and
/// safe after a load that stopped half way. COM interfaces release their
/// reference when the value inside is dropped.
pub struct Slot<T> {
    name: &'static str,
    value: Option<T>,
}

impl<T> Slot<T> {
    pub const fn empty(name: &'static str) -> Self {
        Self { name, value: None }
    }

    pub fn fill(&mut self, value: T) {
        if self.value.is_some() {
            warn!("{} was loaded twice, releasing the older one", self.name);
        }
        self.value = Some(value);
        debug!("Loaded {}", self.name);
    }

    /// The raw option, for APIs that take `*const Option<T>`.
    pub fn as_option(&self) -> &Option<T> {
        &self.value
    }

    pub fn require(&self) -> MyResult<&T> {
        self.value
            .as_ref()
            .ok_or_else(|| eyre::eyre!("{} is not loaded", self.name))
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    /// Returns whether anything was released.
    pub fn release(&mut self) -> bool {
        match self.value.take() {
            Some(value) => {
                drop(value);
                debug!("Released {}", self.name);
                true
            }
            None => false,
        }
    }
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_loaded() { "loaded" } else { "empty" };
        write!(f, "{} ({})", self.name, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct DropCounter(Rc<Cell<u32>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn releasing_twice_drops_once() {
        let drops = Rc::new(Cell::new(0));
        let mut slot = Slot::empty("vertex buffer");
        slot.fill(DropCounter(drops.clone()));

        assert!(slot.release());
        assert!(!slot.release());
        assert_eq!(drops.get(), 1);
        assert!(!slot.is_loaded());
    }

    #[test]
    fn releasing_a_never_filled_slot_is_a_no_op() {
        let mut slot: Slot<DropCounter> = Slot::empty("pixel shader");
        assert!(!slot.release());
        assert!(slot.require().is_err());
        assert_eq!(format!("{slot:?}"), "pixel shader (empty)");
    }

    #[test]
    fn dropping_the_owner_releases_what_is_left() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut slot = Slot::empty("index buffer");
            slot.fill(DropCounter(drops.clone()));
            assert!(slot.require().is_ok());
        }
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn refilling_releases_the_previous_value() {
        let drops = Rc::new(Cell::new(0));
        let mut slot = Slot::empty("input layout");
        slot.fill(DropCounter(drops.clone()));
        slot.fill(DropCounter(drops.clone()));
        assert_eq!(drops.get(), 1);
        slot.release();
        assert_eq!(drops.get(), 2);
    }
}
