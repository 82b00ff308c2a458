pub mod config;
pub mod logger;
pub mod server;
pub mod post;
pub mod post_list;
pub mod post_filter;
pub mod paginator;
pub mod query_string;
pub mod text_utils;
pub mod consent;
pub mod view;
mod template_cache;
mod test_data;
