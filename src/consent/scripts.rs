use crate::config::Tracking;
use crate::consent::ConsentStatus;

/// Third party scripts allowed on the page being rendered.
#[derive(Debug, PartialEq)]
pub struct TrackingScripts<'a> {
    pub analytics_id: Option<&'a str>,
    pub marketing_pixel: Option<&'a str>,
}

impl<'a> TrackingScripts<'a> {
    /// Gated on the consent read when the request came in. A script also
    /// needs its id configured.
    pub fn gate(status: &ConsentStatus, tracking: &'a Tracking) -> Self {
        let analytics_id = tracking.ga_id.as_deref()
            .filter(|id| !id.is_empty() && status.analytics_allowed());
        let marketing_pixel = tracking.meta_pixel.as_deref()
            .filter(|id| !id.is_empty() && status.marketing_allowed());

        TrackingScripts {
            analytics_id,
            marketing_pixel,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.analytics_id.is_none() && self.marketing_pixel.is_none()
    }
}
