use chrono::{Duration, TimeZone, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

pub mod store;
pub mod manager;
pub mod trigger;
pub mod scripts;
pub mod form;

/// Characters left alone by javascript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Visitor decision about optional cookies. Necessary cookies are always on
/// and never stored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ConsentState {
    pub analytics: bool,
    pub marketing: bool,
    /// Epoch millis of the decision
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsentStatus {
    Unknown,
    Decided(ConsentState),
}

impl ConsentStatus {
    pub fn from_state(state: Option<ConsentState>) -> Self {
        match state {
            Some(state) => ConsentStatus::Decided(state),
            None => ConsentStatus::Unknown,
        }
    }

    pub fn state(&self) -> Option<&ConsentState> {
        match self {
            ConsentStatus::Unknown => None,
            ConsentStatus::Decided(state) => Some(state),
        }
    }

    pub fn analytics_allowed(&self) -> bool {
        self.state().is_some_and(|s| s.analytics)
    }

    pub fn marketing_allowed(&self) -> bool {
        self.state().is_some_and(|s| s.marketing)
    }
}

/// Anything other than a well formed state is `None`.
pub fn parse_consent_cookie(raw: Option<&str>) -> Option<ConsentState> {
    let raw = raw.filter(|r| !r.is_empty())?;
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    serde_json::from_str::<ConsentState>(&decoded).ok()
}

pub fn encode_consent_value(state: &ConsentState) -> String {
    // Serializing a struct of bools and an integer can't fail
    let json = serde_json::to_string(state).unwrap_or_default();
    utf8_percent_encode(&json, URI_COMPONENT).to_string()
}

/// Full `Set-Cookie` value. Expiry counts from the decision time.
pub fn make_consent_cookie(cookie_name: &str, state: &ConsentState, max_age_days: i64) -> String {
    let expires = Utc.timestamp_millis_opt(state.timestamp)
        .single()
        .zip(Duration::try_days(max_age_days))
        .and_then(|(t, age)| t.checked_add_signed(age))
        .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC);

    format!("{}={}; Path=/; Expires={}; SameSite=Lax",
            cookie_name,
            encode_consent_value(state),
            expires.format("%a, %d %b %Y %H:%M:%S GMT"))
}

/// Value of `name` in a `Cookie` request header.
pub fn read_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';')
        .map(|c| c.trim())
        .find_map(|c| {
            let (key, value) = c.split_once('=')?;
            if key == name { Some(value) } else { None }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATE: ConsentState = ConsentState {
        analytics: true,
        marketing: false,
        timestamp: 1_754_352_000_000,
    };

    #[test]
    fn test_encode_consent_value() {
        assert_eq!(encode_consent_value(&STATE),
                   "%7B%22analytics%22%3Atrue%2C%22marketing%22%3Afalse%2C%22timestamp%22%3A1754352000000%7D");
    }

    #[test]
    fn test_parse_round_trip() {
        let encoded = encode_consent_value(&STATE);
        assert_eq!(parse_consent_cookie(Some(&encoded)), Some(STATE));
        // Browsers may send it unencoded too
        let plain = r#"{"analytics":false,"marketing":true,"timestamp":1}"#;
        assert_eq!(parse_consent_cookie(Some(plain)), Some(ConsentState { analytics: false, marketing: true, timestamp: 1 }));
    }

    #[test]
    fn test_parse_extra_fields_are_ignored() {
        let raw = r#"{"analytics":true,"marketing":true,"timestamp":5,"necessary":true}"#;
        assert!(parse_consent_cookie(Some(raw)).is_some());
    }

    #[test]
    fn test_parse_malformed() {
        let cases = [
            None,
            Some(""),
            Some("yes"),
            Some("%7B"),
            Some("%E0%A4%A"),
            Some("%FF%FE"),
            Some("null"),
            Some("[]"),
            Some(r#"{"analytics":true,"marketing":true}"#),
            Some(r#"{"analytics":"true","marketing":true,"timestamp":1}"#),
            Some(r#"{"analytics":true,"marketing":1,"timestamp":1}"#),
            Some(r#"{"analytics":true,"marketing":true,"timestamp":"1"}"#),
            Some(r#"{"analytics":true,"marketing":true,"timestamp":null}"#),
        ];
        for raw in cases {
            assert_eq!(parse_consent_cookie(raw), None, "{:?}", raw);
        }
    }

    #[test]
    fn test_make_consent_cookie() {
        let cookie = make_consent_cookie("cookie-consent", &STATE, 180);
        // 2025-08-05 + 180 days
        assert_eq!(cookie, format!(
            "cookie-consent={}; Path=/; Expires=Sun, 01 Feb 2026 00:00:00 GMT; SameSite=Lax",
            encode_consent_value(&STATE)));
    }

    #[test]
    fn test_make_consent_cookie_huge_age() {
        let cookie = make_consent_cookie("cookie-consent", &STATE, i64::MAX);
        assert!(cookie.contains("; Expires="));
        assert!(cookie.ends_with("GMT; SameSite=Lax"));
    }

    #[test]
    fn test_read_cookie() {
        let header = "theme=dark; cookie-consent=abc%3D; other=1";
        assert_eq!(read_cookie(header, "cookie-consent"), Some("abc%3D"));
        assert_eq!(read_cookie(header, "theme"), Some("dark"));
        assert_eq!(read_cookie("cookie-consent-old=1;cookie-consent=x=y", "cookie-consent"), Some("x=y"));
        assert_eq!(read_cookie("", "cookie-consent"), None);
        assert_eq!(read_cookie("flag", "flag"), None);
    }

    #[test]
    fn test_status() {
        assert!(!ConsentStatus::Unknown.analytics_allowed());
        assert!(!ConsentStatus::Unknown.marketing_allowed());
        let decided = ConsentStatus::from_state(Some(STATE));
        assert!(decided.analytics_allowed());
        assert!(!decided.marketing_allowed());
        assert_eq!(decided.state(), Some(&STATE));
    }
}
