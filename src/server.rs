use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use ramhorns::Template;
use spdlog::{error, info, warn};

use crate::config::Config;
use crate::consent::form::{local_path, ConsentForm};
use crate::consent::manager::ConsentManager;
use crate::consent::scripts::TrackingScripts;
use crate::consent::store::CookieConsentStore;
use crate::consent::trigger::PreferencesTrigger;
use crate::post_filter::{BlogQuery, PostFilter};
use crate::post_list::PostList;
use crate::query_string::QueryString;
use crate::template_cache::ContentCache;
use crate::view::consent_renderer::ConsentRenderer;
use crate::view::index_renderer::IndexRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::view::not_found_renderer::NotFoundRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::{parse_template, preferences_link, CardOptions, PageChrome};

struct AppState {
    posts: PostList,
    templates: ContentCache<Template<'static>>,
    config: Config,
}

type SharedState = web::types::State<Arc<Mutex<AppState>>>;

fn lock_state(state: &SharedState) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AppState {
    fn template(&mut self, file_name: &str) -> io::Result<Arc<Template<'static>>> {
        let template_path = self.config.paths.template_dir.join(file_name);
        self.templates.get_or(file_name, || {
            info!("Loading template {}", template_path.display());
            let src = match std::fs::read_to_string(&template_path) {
                Ok(src) => src,
                Err(e) => return Err(io::Error::new(ErrorKind::Other,
                                                    format!("Error loading template {}: {}", template_path.display(), e))),
            };
            parse_template(file_name, src)
        })
    }

    fn card_options(&self) -> CardOptions<'_> {
        CardOptions {
            words_per_minute: self.config.defaults.words_per_minute,
            default_category: &self.config.defaults.default_category,
        }
    }

    fn consent_manager(&self, req: &HttpRequest) -> ConsentManager<CookieConsentStore> {
        let consent_config = &self.config.consent;
        let cookie_header = req.headers().get("cookie").and_then(|v| v.to_str().ok());
        let store = CookieConsentStore::new(&consent_config.cookie_name, consent_config.max_age_days, cookie_header);
        ConsentManager::new(store)
    }

    fn page_chrome(&mut self, manager: &ConsentManager<CookieConsentStore>, return_to: &str) -> io::Result<PageChrome> {
        let renderer = ConsentRenderer::new(self.template("consent.tpl")?, self.template("scripts.tpl")?);
        let consent_html = renderer.render_banner(manager.view(), manager.preferences(), return_to);
        let scripts = renderer.render_scripts(&TrackingScripts::gate(manager.status(), &self.config.tracking));

        Ok(PageChrome {
            site_name: self.config.site.name.clone(),
            consent: consent_html,
            scripts,
            preferences_link: preferences_link(return_to),
        })
    }
}

fn current_path(req: &HttpRequest) -> String {
    match req.uri().path_and_query() {
        Some(pq) => pq.as_str().to_string(),
        None => "/".to_string(),
    }
}

/// Page the preferences dialog sends the visitor back to.
fn preferences_return_to(query: &str) -> String {
    let qs = QueryString::from(query);
    local_path(qs.get_str("return_to")).to_string()
}

fn html_response(state: &mut AppState, req: &HttpRequest, rendered: io::Result<String>, what: &str) -> web::HttpResponse {
    match rendered {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("{} not found: {}", what, e);
            not_found_response(state, req, &format!("Could not find {}", what))
        }
        Err(e) => {
            error!("Error rendering {}: {}", what, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering {}: {}", what, e))
        }
    }
}

/// Falls back to plain text when the not found page itself can't be rendered.
fn not_found_response(state: &mut AppState, req: &HttpRequest, message: &str) -> web::HttpResponse {
    let rendered = render_not_found(state, req, message);
    let mut response = web::HttpResponse::NotFound();
    match rendered {
        Ok(body) => response
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Error rendering not found page: {}", e);
            response.body(message.to_string())
        }
    }
}

fn render_not_found(state: &mut AppState, req: &HttpRequest, message: &str) -> io::Result<String> {
    let manager = state.consent_manager(req);
    let chrome = state.page_chrome(&manager, &current_path(req))?;
    let renderer = NotFoundRenderer::new(state.template("not_found.tpl")?);
    Ok(renderer.render(message, &chrome))
}

fn render_index(state: &mut AppState, req: &HttpRequest, open_preferences: bool) -> io::Result<String> {
    let mut manager = state.consent_manager(req);
    if open_preferences {
        let mut trigger = PreferencesTrigger::new();
        trigger.subscribe(&mut manager);
        trigger.fire();
    }

    let return_to = if open_preferences {
        preferences_return_to(req.uri().query().unwrap_or_default())
    } else {
        current_path(req)
    };
    let chrome = state.page_chrome(&manager, &return_to)?;
    let renderer = IndexRenderer::new(state.template("index.tpl")?);
    let latest = state.posts.latest(state.config.defaults.teaser_count);
    Ok(renderer.render(&latest, state.posts.len(), &state.card_options(), &chrome))
}

fn render_blog(state: &mut AppState, req: &HttpRequest) -> io::Result<String> {
    let qs = QueryString::from(req.uri().query().unwrap_or_default());
    let blog_query = BlogQuery::from_query_string(&qs);

    let manager = state.consent_manager(req);
    let chrome = state.page_chrome(&manager, &current_path(req))?;
    let renderer = ListRenderer::new(state.template("blog.tpl")?);

    let defaults = &state.config.defaults;
    let filter = PostFilter::new(defaults.page_size, &defaults.default_category);
    let listing = filter.filter(state.posts.posts(), &blog_query);
    info!("Blog listing q={:?} category={:?} page={} -> {} posts, {} pages",
        blog_query.query, blog_query.category, blog_query.page, listing.paged.len(), listing.total_pages);

    Ok(renderer.render(&listing, &blog_query, &state.card_options(), &chrome))
}

fn render_post(state: &mut AppState, req: &HttpRequest, slug: &str) -> io::Result<String> {
    let manager = state.consent_manager(req);
    let chrome = state.page_chrome(&manager, &current_path(req))?;
    let renderer = PostRenderer::new(state.template("post.tpl")?);
    let post = state.posts.find(slug)
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, format!("Could not find post {}", slug)))?;
    Ok(renderer.render(post, &state.card_options(), &chrome))
}

#[web::get("/")]
async fn index(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let mut state = lock_state(&state);
    let rendered = render_index(&mut state, &req, false);
    html_response(&mut state, &req, rendered, "index")
}

#[web::get("/cookie-preferences")]
async fn cookie_preferences(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let mut state = lock_state(&state);
    let rendered = render_index(&mut state, &req, true);
    html_response(&mut state, &req, rendered, "cookie preferences")
}

#[web::get("/blog")]
async fn blog(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let mut state = lock_state(&state);
    let rendered = render_blog(&mut state, &req);
    html_response(&mut state, &req, rendered, "blog")
}

#[web::get("/blog/{slug}")]
async fn view(req: HttpRequest, slug: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let mut state = lock_state(&state);
    let slug = slug.into_inner();
    let rendered = render_post(&mut state, &req, &slug);
    html_response(&mut state, &req, rendered, &format!("post {}", slug))
}

#[web::get("/blog/{slug}/")]
async fn view_with_slash(slug: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", format!("/blog/{}", slug.into_inner()))
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[web::post("/consent")]
async fn consent(req: HttpRequest, form: web::types::Form<ConsentForm>, state: SharedState) -> web::HttpResponse {
    let state = lock_state(&state);
    let form = form.into_inner();

    let action = match form.action() {
        Ok(action) => action,
        Err(e) => {
            warn!("Rejecting consent form: {}", e);
            return web::HttpResponse::BadRequest().body(e.to_string());
        }
    };

    let mut manager = state.consent_manager(&req);
    action.apply(&mut manager);
    info!("Consent action {:?}, status now {:?}", action, manager.status());

    let store = manager.into_store();
    let mut response = web::HttpResponse::SeeOther();
    response.header("Location", form.return_path());
    if let Some(set_cookie) = store.set_cookie() {
        response.header("Set-Cookie", set_cookie);
    }
    response.finish()
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: SharedState) -> Result<NamedFile, web::Error> {
    let file_name = path.into_inner();
    if file_name.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let state = lock_state(&state);
    let file_path = state.config.paths.public_dir.join(file_name);
    Ok(NamedFile::open(file_path)?)
}

fn load_posts(posts_file: &Path) -> io::Result<PostList> {
    let posts = PostList::from_file(posts_file)?;
    for post in posts.posts() {
        info!("Post: {} ({})", post.slug, post.date);
    }
    info!("Loaded {} posts from {}", posts.len(), posts_file.display());
    Ok(posts)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let posts = load_posts(&config.paths.posts_file)?;

    let templates = if config.defaults.rendering_cache_enabled {
        ContentCache::new()
    } else {
        ContentCache::non_caching()
    };

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(Mutex::new(AppState {
        posts,
        templates,
        config,
    }));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(cookie_preferences)
            .service(blog)
            .service(view)
            .service(view_with_slash)
            .service(consent)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
