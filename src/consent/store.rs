use crate::consent::{encode_consent_value, make_consent_cookie, parse_consent_cookie, read_cookie, ConsentState};

/// Where the visitor decision is persisted.
pub trait ConsentStore {
    /// `None` when nothing valid was stored.
    fn read(&self) -> Option<ConsentState>;
    fn write(&mut self, state: &ConsentState);
}

/// Keeps the encoded value in memory, the way a cookie jar would.
#[derive(Default)]
pub struct MemoryConsentStore {
    pub value: Option<String>,
    pub write_count: usize,
}

impl MemoryConsentStore {
    pub fn with_value(value: &str) -> Self {
        MemoryConsentStore {
            value: Some(value.to_string()),
            write_count: 0,
        }
    }
}

impl ConsentStore for MemoryConsentStore {
    fn read(&self) -> Option<ConsentState> {
        parse_consent_cookie(self.value.as_deref())
    }

    fn write(&mut self, state: &ConsentState) {
        self.value = Some(encode_consent_value(state));
        self.write_count += 1;
    }
}

/// Reads the consent from a request `Cookie` header and collects the
/// `Set-Cookie` value the response has to carry.
pub struct CookieConsentStore {
    cookie_name: String,
    max_age_days: i64,
    value: Option<String>,
    set_cookie: Option<String>,
}

impl CookieConsentStore {
    pub fn new(cookie_name: &str, max_age_days: i64, cookie_header: Option<&str>) -> Self {
        let value = cookie_header
            .and_then(|header| read_cookie(header, cookie_name))
            .map(|v| v.to_string());

        CookieConsentStore {
            cookie_name: cookie_name.to_string(),
            max_age_days,
            value,
            set_cookie: None,
        }
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.set_cookie.as_deref()
    }
}

impl ConsentStore for CookieConsentStore {
    fn read(&self) -> Option<ConsentState> {
        parse_consent_cookie(self.value.as_deref())
    }

    fn write(&mut self, state: &ConsentState) {
        self.value = Some(encode_consent_value(state));
        self.set_cookie = Some(make_consent_cookie(&self.cookie_name, state, self.max_age_days));
    }
}
