use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::config::DEFAULT_CATEGORY;
use crate::paginator::Paginator;
use crate::post::Post;
use crate::query_string::QueryString;

pub const PAGE_SIZE: u32 = 9;

/// What the visitor asked for on the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogQuery {
    /// Lower case, trimmed
    pub query: Option<String>,
    pub category: Option<String>,
    pub page: u32,
}

impl Default for BlogQuery {
    fn default() -> Self {
        BlogQuery {
            query: None,
            category: None,
            page: 1,
        }
    }
}

impl BlogQuery {
    pub fn new(query: Option<&str>, category: Option<&str>, page: u32) -> Self {
        let query = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());
        let category = category.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        BlogQuery {
            query,
            category,
            page: page.max(1),
        }
    }

    pub fn from_query_string(qs: &QueryString) -> Self {
        Self::new(qs.get_str("q"), qs.get_str("category"), qs.get_page())
    }

    /// First page without search nor category: the newest post gets featured.
    pub fn is_default_view(&self) -> bool {
        self.query.is_none() && self.category.is_none() && self.page == 1
    }
}

pub struct BlogListing<'a> {
    /// Sorted and deduplicated categories of every post
    pub categories: Vec<String>,
    pub featured: Option<&'a Post>,
    pub paged: Vec<&'a Post>,
    pub page: u32,
    pub total_pages: u32,
    /// Posts in the grid across all pages, the featured one excluded
    pub total: usize,
}

impl BlogListing<'_> {
    pub fn is_empty(&self) -> bool {
        self.featured.is_none() && self.paged.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub struct PostFilter {
    page_size: u32,
    default_category: String,
}

impl Default for PostFilter {
    fn default() -> Self {
        PostFilter::new(PAGE_SIZE, DEFAULT_CATEGORY)
    }
}

impl PostFilter {
    pub fn new(page_size: u32, default_category: &str) -> Self {
        PostFilter {
            page_size: page_size.max(1),
            default_category: default_category.to_string(),
        }
    }

    pub fn categories(&self, posts: &[Post]) -> Vec<String> {
        let categories: BTreeSet<&str> = posts.iter()
            .map(|p| p.category_or(&self.default_category))
            .collect();
        categories.into_iter().map(|c| c.to_string()).collect()
    }

    pub fn filter<'a>(&self, posts: &'a [Post], blog_query: &BlogQuery) -> BlogListing<'a> {
        let categories = self.categories(posts);

        let mut list: Vec<&Post> = posts.iter().collect();
        sort_by_newest(&mut list);

        if let Some(ref category) = blog_query.category {
            list.retain(|p| p.category_or(&self.default_category) == category);
        }
        if let Some(ref needle) = blog_query.query {
            list.retain(|p| p.matches(needle));
        }

        let featured = if blog_query.is_default_view() && !list.is_empty() {
            Some(list.remove(0))
        } else {
            None
        };

        let paginator = Paginator::from(&list, self.page_size);
        let paged = paginator.get_page(blog_query.page).to_vec();

        BlogListing {
            categories,
            featured,
            paged,
            page: blog_query.page,
            total_pages: paginator.page_count(),
            total: paginator.item_count(),
        }
    }
}

/// Newest first. Unparseable dates count as epoch 0, ties go by slug.
pub fn sort_by_newest(posts: &mut [&Post]) {
    posts.sort_by_cached_key(|p| (Reverse(p.timestamp()), p.slug.clone()));
}
