use std::io;
use std::sync::Arc;

use ramhorns::Template;

use crate::post_filter::{BlogListing, BlogQuery};
use crate::query_string::make_list_url;
use crate::view::{category_link, parse_template, CardOptions, PageChrome, PostCard};

const BLOG_PATH: &str = "/blog";

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site_name: &'a str,
    consent: &'a str,
    scripts: &'a str,
    preferences_link: &'a str,
    query: &'a str,
    category: &'a str,
    all_active: bool,
    categories: Vec<ViewCategory<'a>>,
    featured: Option<PostCard>,
    post_list: Vec<PostCard>,
    empty: bool,
    show_pagination: bool,
    page: u32,
    total_pages: u32,
    prev_link: Option<ViewLink>,
    next_link: Option<ViewLink>,
}

#[derive(ramhorns::Content)]
struct ViewCategory<'a> {
    name: &'a str,
    link: String,
    active: bool,
}

#[derive(ramhorns::Content)]
struct ViewLink {
    href: String,
}

pub struct ListRenderer {
    template: Arc<Template<'static>>,
}

impl ListRenderer {
    pub fn new(template: Arc<Template<'static>>) -> Self {
        ListRenderer { template }
    }

    pub fn from_source(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = parse_template("blog list", list_tpl_src.to_string())?;
        Ok(Self::new(Arc::new(template)))
    }

    pub fn render(&self, listing: &BlogListing, blog_query: &BlogQuery, options: &CardOptions, chrome: &PageChrome) -> String {
        let query = blog_query.query.as_deref();
        let category = blog_query.category.as_deref();

        let categories = listing.categories.iter()
            .map(|c| ViewCategory {
                name: c.as_str(),
                link: category_link(c),
                active: category == Some(c.as_str()),
            })
            .collect();

        let featured = listing.featured.map(|p| PostCard::from(p, options));
        let post_list: Vec<PostCard> = listing.paged.iter().map(|p| PostCard::from(p, options)).collect();

        let prev_link = if listing.has_prev() {
            Some(ViewLink { href: make_list_url(BLOG_PATH, query, category, listing.page - 1) })
        } else {
            None
        };
        let next_link = if listing.has_next() {
            Some(ViewLink { href: make_list_url(BLOG_PATH, query, category, listing.page + 1) })
        } else {
            None
        };

        self.template.render(&ListPage {
            site_name: &chrome.site_name,
            consent: &chrome.consent,
            scripts: &chrome.scripts,
            preferences_link: &chrome.preferences_link,
            query: query.unwrap_or_default(),
            category: category.unwrap_or_default(),
            all_active: category.is_none(),
            categories,
            empty: featured.is_none() && post_list.is_empty(),
            featured,
            post_list,
            show_pagination: listing.total_pages > 1,
            page: listing.page,
            total_pages: listing.total_pages,
            prev_link,
            next_link,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::post::Post;
    use crate::post_filter::PostFilter;
    use crate::test_data::make_post;

    use super::*;

    const TEMPLATE: &str = "CATS=[{{#all_active}}*{{/all_active}}All{{#categories}}|{{name}}{{#active}}*{{/active}}{{/categories}}]\n\
FEATURED=[{{#featured}}{{slug}} {{display_date}} {{reading_time}}{{/featured}}]\n\
POSTS=[{{#post_list}}({{slug}} {{category}}){{/post_list}}]\n\
EMPTY=[{{#empty}}No posts found.{{/empty}}]\n\
PAGES=[{{#show_pagination}}{{#prev_link}}<{{href}}{{/prev_link}} {{page}}/{{total_pages}} {{#next_link}}{{href}}>{{/next_link}}{{/show_pagination}}]\n\
CONSENT=[{{{consent}}}]";

    fn chrome() -> PageChrome {
        PageChrome {
            site_name: "Devsolutify".to_string(),
            consent: "<banner>".to_string(),
            scripts: "".to_string(),
            preferences_link: "/cookie-preferences".to_string(),
        }
    }

    fn options() -> CardOptions<'static> {
        CardOptions { words_per_minute: 250, default_category: "Insights" }
    }

    fn render(posts: &[Post], query: &BlogQuery, filter: &PostFilter) -> String {
        let listing = filter.filter(posts, query);
        ListRenderer::from_source(TEMPLATE).unwrap().render(&listing, query, &options(), &chrome())
    }

    #[test]
    fn test_render_default_view() {
        let mut guide = make_post("guide", "2025-07-10");
        guide.category = Some("Guides".to_string());
        let posts = vec![guide, make_post("theme", "2025-08-05")];

        let res = render(&posts, &BlogQuery::default(), &PostFilter::default());
        assert_eq!(res, "CATS=[*All|Guides|Insights]\n\
FEATURED=[theme Aug 5, 2025 2]\n\
POSTS=[(guide Guides)]\n\
EMPTY=[]\n\
PAGES=[]\n\
CONSENT=[<banner>]");
    }

    #[test]
    fn test_render_empty_state() {
        let posts = vec![make_post("theme", "2025-08-05")];
        let query = BlogQuery::new(Some("nothing"), Some("Insights"), 1);
        let res = render(&posts, &query, &PostFilter::default());
        assert!(res.starts_with("CATS=[All|Insights*]\n"));
        assert!(res.contains("EMPTY=[No posts found.]"));
        assert!(res.contains("POSTS=[]"));
    }

    #[test]
    fn test_render_pagination_links() {
        let posts: Vec<Post> = (1..=5)
            .map(|i| make_post(&format!("post-{}", i), &format!("2025-01-0{}", i)))
            .collect();
        let filter = PostFilter::new(2, "Insights");

        let res = render(&posts, &BlogQuery::new(None, None, 2), &filter);
        assert!(res.contains("POSTS=[(post-3 Insights)(post-2 Insights)]"));
        assert!(res.contains("PAGES=[</blog 2/3 /blog?page=3>]"));

        let res = render(&posts, &BlogQuery::new(Some("Title"), None, 3), &filter);
        assert!(res.contains("PAGES=[</blog?q=title&amp;page=2 3/3 ]"));
    }
}
