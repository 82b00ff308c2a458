use std::io;
use std::sync::Arc;

use ramhorns::Template;

use crate::post::Post;
use crate::view::{parse_template, CardOptions, PageChrome, PostCard};

#[derive(ramhorns::Content)]
struct ViewParagraph<'a> {
    text: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    site_name: &'a str,
    consent: &'a str,
    scripts: &'a str,
    preferences_link: &'a str,
    post: PostCard,
    paragraphs: Vec<ViewParagraph<'a>>,
}

pub struct PostRenderer {
    template: Arc<Template<'static>>,
}

impl PostRenderer {
    pub fn new(template: Arc<Template<'static>>) -> Self {
        PostRenderer { template }
    }

    pub fn from_source(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = parse_template("post view", view_tpl_src.to_string())?;
        Ok(Self::new(Arc::new(template)))
    }

    pub fn render(&self, post: &Post, options: &CardOptions, chrome: &PageChrome) -> String {
        let paragraphs = post.content.iter()
            .map(|p| ViewParagraph { text: p.as_str() })
            .collect();

        self.template.render(&ViewItem {
            site_name: &chrome.site_name,
            consent: &chrome.consent,
            scripts: &chrome.scripts,
            preferences_link: &chrome.preferences_link,
            post: PostCard::from(post, options),
            paragraphs,
        })
    }
}
