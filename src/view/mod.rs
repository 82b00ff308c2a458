use std::io;
use std::io::ErrorKind;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use ramhorns::Template;

use crate::post::Post;
use crate::text_utils::format_post_date;

pub mod list_renderer;
pub mod post_renderer;
pub mod index_renderer;
pub mod consent_renderer;
pub mod not_found_renderer;

const PREFERENCES_PATH: &str = "/cookie-preferences";

pub fn parse_template(name: &str, src: String) -> io::Result<Template<'static>> {
    match Template::new(src) {
        Ok(template) => Ok(template),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing {} template: {}", name, e))),
    }
}

/// Pieces every page carries around its own content.
pub struct PageChrome {
    pub site_name: String,
    /// Rendered consent banner and preferences dialog
    pub consent: String,
    /// Rendered tracking scripts the visitor agreed to
    pub scripts: String,
    /// Footer link reopening the preferences dialog for the current page
    pub preferences_link: String,
}

/// Settings used to present a post.
#[derive(Clone)]
pub struct CardOptions<'a> {
    pub words_per_minute: u32,
    pub default_category: &'a str,
}

#[derive(ramhorns::Content)]
pub struct PostCard {
    pub slug: String,
    pub link: String,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub date: String,
    pub display_date: String,
    pub author: String,
    pub category: String,
    pub category_link: String,
    pub reading_time: u32,
}

impl PostCard {
    pub fn from(post: &Post, options: &CardOptions) -> Self {
        let category = post.category_or(options.default_category).to_string();
        PostCard {
            slug: post.slug.clone(),
            link: format!("/blog/{}", post.slug),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            image: post.image.clone(),
            date: post.date.clone(),
            display_date: format_post_date(&post.date),
            author: post.author.clone(),
            category_link: category_link(&category),
            category,
            reading_time: post.reading_time_with(options.words_per_minute),
        }
    }
}

pub fn category_link(category: &str) -> String {
    format!("/blog?category={}", utf8_percent_encode(category, NON_ALPHANUMERIC))
}

pub fn preferences_link(return_to: &str) -> String {
    if return_to == "/" {
        return PREFERENCES_PATH.to_string();
    }
    format!("{}?return_to={}", PREFERENCES_PATH, utf8_percent_encode(return_to, NON_ALPHANUMERIC))
}
