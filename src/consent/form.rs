use std::io;
use std::io::ErrorKind;

use serde::Deserialize;

use crate::consent::manager::{Clock, ConsentManager};
use crate::consent::store::ConsentStore;

/// Body of the banner and preferences forms.
#[derive(Deserialize, Debug, Default)]
pub struct ConsentForm {
    pub action: String,
    pub analytics: Option<String>,
    pub marketing: Option<String>,
    pub return_to: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum ConsentAction {
    AcceptAll,
    RejectAll,
    Save { analytics: bool, marketing: bool },
    Close,
}

fn is_checked(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("on") | Some("true") | Some("1"))
}

impl ConsentForm {
    pub fn from_body(body: &str) -> io::Result<ConsentForm> {
        match serde_urlencoded::from_str(body) {
            Ok(form) => Ok(form),
            Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Invalid consent form: {}", e))),
        }
    }

    pub fn action(&self) -> io::Result<ConsentAction> {
        match self.action.as_str() {
            "accept" => Ok(ConsentAction::AcceptAll),
            "reject" => Ok(ConsentAction::RejectAll),
            "save" => Ok(ConsentAction::Save {
                analytics: is_checked(&self.analytics),
                marketing: is_checked(&self.marketing),
            }),
            "close" => Ok(ConsentAction::Close),
            other => Err(io::Error::new(ErrorKind::InvalidInput, format!("Unknown consent action [{}]", other))),
        }
    }

    pub fn return_path(&self) -> &str {
        local_path(self.return_to.as_deref())
    }
}

/// Only local paths, anything else goes back home. Browsers drop tabs and
/// newlines while parsing a `Location`, so control characters are refused
/// before looking for a `//` prefix.
pub fn local_path(candidate: Option<&str>) -> &str {
    match candidate {
        Some(path) if path.chars().any(char::is_control) => "/",
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path,
        _ => "/",
    }
}

impl ConsentAction {
    pub fn apply<S: ConsentStore, C: Clock>(&self, manager: &mut ConsentManager<S, C>) {
        match *self {
            ConsentAction::AcceptAll => { manager.accept_all(); }
            ConsentAction::RejectAll => { manager.reject_all(); }
            ConsentAction::Save { analytics, marketing } => { manager.save_preferences(analytics, marketing); }
            ConsentAction::Close => manager.close_preferences(),
        }
    }
}
