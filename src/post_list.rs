use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::post::Post;
use crate::post_filter::sort_by_newest;

#[derive(Deserialize)]
struct PostsFile {
    #[serde(default)]
    posts: Vec<Post>,
}

/// Static, read-only list of posts loaded once at start-up.
pub struct PostList {
    posts: Vec<Post>,
}

impl PostList {
    pub fn new(posts: Vec<Post>) -> io::Result<PostList> {
        Self::validate(&posts)?;
        Ok(PostList { posts })
    }

    pub fn from_file(file_path: &Path) -> io::Result<PostList> {
        let content = match fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening posts file {}: {}", file_path.display(), e))),
        };
        Self::from_string(&content)
    }

    pub fn from_string(content: &str) -> io::Result<PostList> {
        let posts_file: PostsFile = match toml::from_str(content) {
            Ok(posts_file) => posts_file,
            Err(e) => return Err(io::Error::new(ErrorKind::InvalidData, format!("Error parsing posts file: {}", e))),
        };
        Self::new(posts_file.posts)
    }

    fn validate(posts: &[Post]) -> io::Result<()> {
        lazy_static! {
            static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9][a-z0-9-]*$").unwrap();
        }

        let mut seen = HashSet::new();
        for post in posts {
            if !SLUG_REGEX.is_match(&post.slug) {
                return Err(io::Error::new(ErrorKind::InvalidData, format!("Invalid post slug [{}]", post.slug)));
            }
            if !seen.insert(post.slug.as_str()) {
                return Err(io::Error::new(ErrorKind::InvalidData, format!("Duplicated post slug [{}]", post.slug)));
            }
        }
        Ok(())
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// The `count` newest posts, in listing order.
    pub fn latest(&self, count: usize) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        sort_by_newest(&mut posts);
        posts.truncate(count);
        posts
    }
}
