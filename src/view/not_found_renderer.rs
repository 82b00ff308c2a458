use std::io;
use std::sync::Arc;

use ramhorns::Template;

use crate::view::{parse_template, PageChrome};

#[derive(ramhorns::Content)]
struct NotFoundPage<'a> {
    site_name: &'a str,
    consent: &'a str,
    scripts: &'a str,
    preferences_link: &'a str,
    message: &'a str,
}

pub struct NotFoundRenderer {
    template: Arc<Template<'static>>,
}

impl NotFoundRenderer {
    pub fn new(template: Arc<Template<'static>>) -> Self {
        NotFoundRenderer { template }
    }

    pub fn from_source(not_found_tpl_src: &str) -> io::Result<NotFoundRenderer> {
        let template = parse_template("not found", not_found_tpl_src.to_string())?;
        Ok(Self::new(Arc::new(template)))
    }

    pub fn render(&self, message: &str, chrome: &PageChrome) -> String {
        self.template.render(&NotFoundPage {
            site_name: &chrome.site_name,
            consent: &chrome.consent,
            scripts: &chrome.scripts,
            preferences_link: &chrome.preferences_link,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_not_found() {
        let renderer = NotFoundRenderer::from_source("{{site_name}} 404 [{{message}}] {{{consent}}}|{{{scripts}}}|{{preferences_link}}").unwrap();
        let chrome = PageChrome {
            site_name: "Devsolutify".to_string(),
            consent: "<banner>".to_string(),
            scripts: "<script></script>".to_string(),
            preferences_link: "/cookie-preferences".to_string(),
        };
        let res = renderer.render("Could not find post <nope>", &chrome);
        assert_eq!(res, "Devsolutify 404 [Could not find post &lt;nope&gt;] <banner>|<script></script>|/cookie-preferences");
    }
}
