use std::cell::Cell;

#[derive(Debug, Default)]
pub struct WarnOnce {
    fired: Cell<bool>,
}

impl WarnOnce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&self) -> bool {
        !self.fired.replace(true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}
