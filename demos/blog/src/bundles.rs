//! The demo's two bundles: `Blog` (posts) and `App` (everything else).

use adroit::prelude::*;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize)]
struct Post {
    id: u32,
    title: &'static str,
    body: &'static str,
}

const POSTS: &[Post] = &[
    Post {
        id: 1,
        title: "Routing without a route table",
        body: "Paths are mapped to actions by naming convention alone.",
    },
    Post {
        id: 42,
        title: "Backtracking, step by step",
        body: "Index, then the request verb, then one segment shorter.",
    },
];

// =============================================================================
// Blog
// =============================================================================

/// `/blog`: lists the posts.
#[derive(Default)]
struct ListPosts;

impl Action for ListPosts {
    fn invoke(
        &mut self,
        ctx: &mut ActionContext<'_>,
        _params: &[String],
    ) -> Result<Response, BoxError> {
        let titles: Vec<Value> = POSTS
            .iter()
            .map(|p| json!({ "id": p.id, "title": p.title }))
            .collect();
        ctx.respond(&titles)
    }
}

/// `/blog/post/{id}`: shows one post.
#[derive(Default)]
struct ShowPost;

impl Action for ShowPost {
    fn invoke(
        &mut self,
        ctx: &mut ActionContext<'_>,
        params: &[String],
    ) -> Result<Response, BoxError> {
        let Some(raw) = params.first() else {
            return Ok(Response::text("missing post id").with_status(400));
        };
        let Ok(id) = raw.parse::<u32>() else {
            return Ok(Response::text(format!("invalid post id '{raw}'")).with_status(400));
        };

        match POSTS.iter().find(|p| p.id == id) {
            Some(post) => ctx.respond(post),
            None => Ok(Response::not_found().with_body(format!("no post {id}"))),
        }
    }
}

/// Renders a post as plain text.
#[derive(Default)]
struct PostPage;

impl Responder for PostPage {
    fn respond(
        &self,
        _request: &Request,
        _route: &MatchedRoute,
        payload: Value,
    ) -> Result<Response, BoxError> {
        let title = payload["title"].as_str().unwrap_or_default();
        let body = payload["body"].as_str().unwrap_or_default();
        Ok(Response::text(format!("# {title}\n\n{body}"))
            .with_header("content-type", "text/plain; charset=utf-8"))
    }
}

#[distributed_slice(BUNDLES)]
#[linkme(crate = adroit::framework::linkme)]
static BLOG: BundleDescriptor = bundle! {
    name: "Blog",
    namespace: "Blog\\",
    actions: {
        "Index" => ListPosts::default,
        "Post" => ShowPost::default,
    },
    responders: {
        "Post" => PostPage::default,
    },
};

// =============================================================================
// App
// =============================================================================

/// Greets in the request's language.
///
/// When reached as a fallback, the first parameter is the bundle segment
/// (`App`, or `app` for an explicit `/app/...`) and the rest is the path.
fn home() -> impl Action {
    |ctx: &mut ActionContext<'_>, params: &[String]| -> Result<Response, BoxError> {
        let greeting = match ctx.language() {
            "fr" => "Bienvenue",
            _ => "Welcome",
        };
        match params.split_first() {
            Some((_, rest)) if !rest.is_empty() => Ok(Response::text(format!(
                "{greeting}, unknown page /{}",
                rest.join("/")
            ))
            .with_status(404)),
            _ => Ok(Response::text(greeting)),
        }
    }
}

/// `/about` over HTTP verbs.
fn about() -> impl Action {
    |ctx: &mut ActionContext<'_>, _: &[String]| -> Result<Response, BoxError> {
        ctx.respond(&json!({
            "framework": "adroit",
            "bundles": ["Blog", "App"],
            "method": ctx.request().method(),
        }))
    }
}

/// `/about` from the command line, reached through the `CliMethod` verb
/// fallback.
fn about_cli() -> impl Action {
    |ctx: &mut ActionContext<'_>, _: &[String]| -> Result<Response, BoxError> {
        Ok(Response::text(format!(
            "adroit blog demo (action token: {})",
            ctx.route().action_token()
        )))
    }
}

#[distributed_slice(BUNDLES)]
#[linkme(crate = adroit::framework::linkme)]
static APP: BundleDescriptor = bundle! {
    name: "App",
    namespace: "App\\",
    actions: {
        "Index" => home,
        "About" => about,
        "About\\CliMethod" => about_cli,
    },
};
