use chrono::Utc;

use crate::consent::store::ConsentStore;
use crate::consent::trigger::PreferencesListener;
use crate::consent::{ConsentState, ConsentStatus};

pub trait Clock {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// What the consent UI shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerView {
    Hidden,
    Banner,
    Preferences,
}

/// Toggle positions offered before any decision.
const DEFAULT_ANALYTICS: bool = true;
const DEFAULT_MARKETING: bool = false;

pub struct ConsentManager<S: ConsentStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    status: ConsentStatus,
    view: BannerView,
}

impl<S: ConsentStore> ConsentManager<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: ConsentStore, C: Clock> ConsentManager<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        let status = ConsentStatus::from_state(store.read());
        let view = match status {
            ConsentStatus::Unknown => BannerView::Banner,
            ConsentStatus::Decided(_) => BannerView::Hidden,
        };

        ConsentManager {
            store,
            clock,
            status,
            view,
        }
    }

    pub fn status(&self) -> &ConsentStatus {
        &self.status
    }

    pub fn view(&self) -> BannerView {
        self.view
    }

    /// Toggle positions for the preferences dialog.
    pub fn preferences(&self) -> (bool, bool) {
        match self.status {
            ConsentStatus::Decided(state) => (state.analytics, state.marketing),
            ConsentStatus::Unknown => (DEFAULT_ANALYTICS, DEFAULT_MARKETING),
        }
    }

    pub fn accept_all(&mut self) -> ConsentState {
        self.save_preferences(true, true)
    }

    pub fn reject_all(&mut self) -> ConsentState {
        self.save_preferences(false, false)
    }

    pub fn save_preferences(&mut self, analytics: bool, marketing: bool) -> ConsentState {
        let state = ConsentState {
            analytics,
            marketing,
            timestamp: self.clock.now_millis(),
        };
        self.store.write(&state);
        self.status = ConsentStatus::Decided(state);
        self.view = BannerView::Hidden;
        state
    }

    /// Shows the dialog whatever was decided. Nothing is persisted.
    pub fn open_preferences(&mut self) {
        self.view = BannerView::Preferences;
    }

    pub fn close_preferences(&mut self) {
        if self.view != BannerView::Preferences {
            return;
        }
        self.view = match self.status {
            ConsentStatus::Unknown => BannerView::Banner,
            ConsentStatus::Decided(_) => BannerView::Hidden,
        };
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: ConsentStore, C: Clock> PreferencesListener for ConsentManager<S, C> {
    fn on_open_preferences(&mut self) {
        self.open_preferences();
    }
}

#[cfg(test)]
mod tests {
    use crate::consent::encode_consent_value;
    use crate::consent::store::MemoryConsentStore;
    use crate::consent::trigger::PreferencesTrigger;

    use super::*;

    const NOW: i64 = 1_754_352_000_000;

    fn manager(store: MemoryConsentStore) -> ConsentManager<MemoryConsentStore, FixedClock> {
        ConsentManager::with_clock(store, FixedClock(NOW))
    }

    fn decided(analytics: bool, marketing: bool) -> MemoryConsentStore {
        MemoryConsentStore::with_value(&encode_consent_value(&ConsentState {
            analytics,
            marketing,
            timestamp: 1,
        }))
    }

    #[test]
    fn test_unknown_shows_banner() {
        let m = manager(MemoryConsentStore::default());
        assert_eq!(m.status(), &ConsentStatus::Unknown);
        assert_eq!(m.view(), BannerView::Banner);
        assert_eq!(m.preferences(), (true, false));
    }

    #[test]
    fn test_malformed_cookie_shows_banner() {
        let m = manager(MemoryConsentStore::with_value("%7B%22analytics%22%3Atrue%7D"));
        assert_eq!(m.status(), &ConsentStatus::Unknown);
        assert_eq!(m.view(), BannerView::Banner);
    }

    #[test]
    fn test_decided_hides_banner() {
        let m = manager(decided(false, true));
        assert_eq!(m.view(), BannerView::Hidden);
        assert_eq!(m.preferences(), (false, true));
        assert!(m.status().marketing_allowed());
    }

    #[test]
    fn test_accept_all() {
        let mut m = manager(MemoryConsentStore::default());
        let state = m.accept_all();
        assert_eq!(state, ConsentState { analytics: true, marketing: true, timestamp: NOW });
        assert_eq!(m.view(), BannerView::Hidden);
        assert_eq!(m.status(), &ConsentStatus::Decided(state));
        assert_eq!(m.into_store().read(), Some(state));
    }

    #[test]
    fn test_reject_all_overwrites() {
        let mut m = manager(decided(true, true));
        m.open_preferences();
        let state = m.reject_all();
        assert!(!state.analytics && !state.marketing);
        assert_eq!(m.view(), BannerView::Hidden);
        let store = m.into_store();
        assert_eq!(store.read(), Some(state));
        assert_eq!(store.write_count, 1);
    }

    #[test]
    fn test_save_preferences_round_trip() {
        for (analytics, marketing) in [(true, true), (true, false), (false, true), (false, false)] {
            let mut m = manager(MemoryConsentStore::default());
            m.save_preferences(analytics, marketing);
            let stored = m.into_store().read().unwrap();
            assert_eq!((stored.analytics, stored.marketing), (analytics, marketing));
            assert_eq!(stored.timestamp, NOW);
        }
    }

    #[test]
    fn test_open_preferences_does_not_persist() {
        let mut m = manager(decided(true, false));
        m.open_preferences();
        assert_eq!(m.view(), BannerView::Preferences);
        assert_eq!(m.preferences(), (true, false));
        m.close_preferences();
        assert_eq!(m.view(), BannerView::Hidden);
        assert_eq!(m.into_store().write_count, 0);
    }

    #[test]
    fn test_close_preferences_when_unknown() {
        let mut m = manager(MemoryConsentStore::default());
        m.close_preferences();
        assert_eq!(m.view(), BannerView::Banner);
        m.open_preferences();
        m.close_preferences();
        assert_eq!(m.view(), BannerView::Banner);
        assert_eq!(m.status(), &ConsentStatus::Unknown);
    }

    #[test]
    fn test_trigger_opens_preferences() {
        let mut m = manager(decided(false, false));
        {
            let mut trigger = PreferencesTrigger::new();
            trigger.subscribe(&mut m);
            trigger.fire();
        }
        assert_eq!(m.view(), BannerView::Preferences);
        assert_eq!(m.into_store().write_count, 0);
    }
}
