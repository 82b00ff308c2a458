use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Deserialize;

use crate::config::DEFAULT_CATEGORY;
use crate::text_utils::{post_timestamp, word_count};

pub const WORDS_PER_MINUTE: u32 = 250;
pub const MIN_READING_MINUTES: u32 = 2;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// ISO date or a readable one, e.g. `August 5, 2025`
    pub date: String,
    pub author: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub content: Vec<String>,
    pub category: Option<String>,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, author={}, category={}\ntitle={}",
               self.slug,
               self.date,
               self.author,
               self.effective_category(),
               self.title,
        )
    }
}

impl Post {
    pub fn effective_category(&self) -> &str {
        self.category_or(DEFAULT_CATEGORY)
    }

    pub fn category_or<'a>(&'a self, default_category: &'a str) -> &'a str {
        match self.category {
            Some(ref category) => category.as_str(),
            None => default_category,
        }
    }

    pub fn body(&self) -> String {
        self.content.join(" ")
    }

    pub fn timestamp(&self) -> i64 {
        post_timestamp(&self.date)
    }

    pub fn word_count(&self) -> usize {
        let text = format!("{} {} {}", self.title, self.excerpt, self.body());
        word_count(&text)
    }

    pub fn reading_time(&self) -> u32 {
        self.reading_time_with(WORDS_PER_MINUTE)
    }

    pub fn reading_time_with(&self, words_per_minute: u32) -> u32 {
        let minutes = (self.word_count() as f64 / words_per_minute as f64).round() as u32;
        minutes.max(MIN_READING_MINUTES)
    }

    /// `needle` has to be lower case already.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.body().to_lowercase().contains(needle)
    }
}
