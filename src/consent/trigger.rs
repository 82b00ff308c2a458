/// Notified when the visitor asks to review cookie preferences, e.g. from
/// the footer link.
pub trait PreferencesListener {
    fn on_open_preferences(&mut self);
}

#[derive(Default)]
pub struct PreferencesTrigger<'a> {
    listeners: Vec<&'a mut dyn PreferencesListener>,
}

impl<'a> PreferencesTrigger<'a> {
    pub fn new() -> Self {
        PreferencesTrigger {
            listeners: vec![],
        }
    }

    pub fn subscribe(&mut self, listener: &'a mut dyn PreferencesListener) {
        self.listeners.push(listener);
    }

    /// Returns how many listeners were notified.
    pub fn fire(&mut self) -> usize {
        for listener in self.listeners.iter_mut() {
            listener.on_open_preferences();
        }
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        calls: u32,
    }

    impl PreferencesListener for Counter {
        fn on_open_preferences(&mut self) {
            self.calls += 1;
        }
    }

    #[test]
    fn test_fire_notifies_every_listener() {
        let mut first = Counter::default();
        let mut second = Counter::default();
        {
            let mut trigger = PreferencesTrigger::new();
            trigger.subscribe(&mut first);
            trigger.subscribe(&mut second);
            assert_eq!(trigger.fire(), 2);
            assert_eq!(trigger.fire(), 2);
        }
        assert_eq!(first.calls, 2);
        assert_eq!(second.calls, 2);
    }

    #[test]
    fn test_fire_without_listeners() {
        let mut trigger = PreferencesTrigger::new();
        assert_eq!(trigger.fire(), 0);
    }
}
