use std::io;
use std::sync::Arc;

use ramhorns::Template;

use crate::consent::manager::BannerView;
use crate::consent::scripts::TrackingScripts;
use crate::view::{parse_template, preferences_link};

#[derive(ramhorns::Content)]
struct ConsentView<'a> {
    show_banner: bool,
    show_preferences: bool,
    analytics_checked: bool,
    marketing_checked: bool,
    return_to: &'a str,
    preferences_link: String,
}

#[derive(ramhorns::Content)]
struct ScriptsView<'a> {
    analytics_id: Option<ViewId<'a>>,
    marketing_pixel: Option<ViewId<'a>>,
}

#[derive(ramhorns::Content)]
struct ViewId<'a> {
    id: &'a str,
}

pub struct ConsentRenderer {
    banner: Arc<Template<'static>>,
    scripts: Arc<Template<'static>>,
}

impl ConsentRenderer {
    pub fn new(banner: Arc<Template<'static>>, scripts: Arc<Template<'static>>) -> Self {
        ConsentRenderer { banner, scripts }
    }

    pub fn from_source(banner_tpl_src: &str, scripts_tpl_src: &str) -> io::Result<ConsentRenderer> {
        let banner = parse_template("consent", banner_tpl_src.to_string())?;
        let scripts = parse_template("scripts", scripts_tpl_src.to_string())?;
        Ok(Self::new(Arc::new(banner), Arc::new(scripts)))
    }

    /// `preferences` are the toggle positions, `return_to` the page the
    /// form goes back to once submitted.
    pub fn render_banner(&self, view: BannerView, preferences: (bool, bool), return_to: &str) -> String {
        if view == BannerView::Hidden {
            return String::new();
        }

        let (analytics_checked, marketing_checked) = preferences;
        self.banner.render(&ConsentView {
            show_banner: view == BannerView::Banner,
            show_preferences: view == BannerView::Preferences,
            analytics_checked,
            marketing_checked,
            return_to,
            preferences_link: preferences_link(return_to),
        })
    }

    pub fn render_scripts(&self, scripts: &TrackingScripts) -> String {
        if scripts.is_empty() {
            return String::new();
        }

        self.scripts.render(&ScriptsView {
            analytics_id: scripts.analytics_id.map(|id| ViewId { id }),
            marketing_pixel: scripts.marketing_pixel.map(|id| ViewId { id }),
        })
    }
}
