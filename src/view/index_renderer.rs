use std::io;
use std::sync::Arc;

use ramhorns::Template;

use crate::post::Post;
use crate::view::{parse_template, CardOptions, PageChrome, PostCard};

#[derive(ramhorns::Content)]
struct IndexPage<'a> {
    site_name: &'a str,
    consent: &'a str,
    scripts: &'a str,
    preferences_link: &'a str,
    post_count: u32,
    latest_posts: Vec<PostCard>,
}

pub struct IndexRenderer {
    template: Arc<Template<'static>>,
}

impl IndexRenderer {
    pub fn new(template: Arc<Template<'static>>) -> Self {
        IndexRenderer { template }
    }

    pub fn from_source(index_tpl_src: &str) -> io::Result<IndexRenderer> {
        let template = parse_template("index", index_tpl_src.to_string())?;
        Ok(Self::new(Arc::new(template)))
    }

    pub fn render(&self, latest: &[&Post], post_count: usize, options: &CardOptions, chrome: &PageChrome) -> String {
        self.template.render(&IndexPage {
            site_name: &chrome.site_name,
            consent: &chrome.consent,
            scripts: &chrome.scripts,
            preferences_link: &chrome.preferences_link,
            post_count: post_count as u32,
            latest_posts: latest.iter().map(|p| PostCard::from(p, options)).collect(),
        })
    }
}
