//! Blog Demo
//!
//! Routes one request through an Adroit application and prints the
//! response. Bundles are contributed through the `BUNDLES` slice in
//! [`bundles`]; which of them load is decided by `adroit.toml`.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p blog-demo -- /blog
//! cargo run -p blog-demo -- /blog/post/42
//! cargo run -p blog-demo -- /fr
//! cargo run -p blog-demo -- /about
//! cargo run -p blog-demo -- /about --method GET
//! cargo run -p blog-demo -- /blog/post/42 --resolve-only
//! ```

mod bundles;

use std::path::PathBuf;
use std::process::ExitCode;

use adroit::core::CLI_METHOD;
use adroit::prelude::*;
use clap::Parser;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "blog-demo", about = "Route a path through the Adroit blog demo")]
struct Cli {
    /// Path to route, e.g. `/blog/post/42`.
    #[arg(default_value = "/")]
    path: String,

    /// Request method; `cli` unless an HTTP verb is given.
    #[arg(long, short, default_value = CLI_METHOD)]
    method: String,

    /// Config file (default: search `adroit.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the resolution without dispatching.
    #[arg(long)]
    resolve_only: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().file(path),
        None => ConfigLoader::new()
            .search_path(env!("CARGO_MANIFEST_DIR"))
            .with_current_dir(),
    };
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init_from_config(&config.logging);

    let app = match Application::from_linked(&config) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Bootstrap failed");
            return ExitCode::FAILURE;
        }
    };

    app.events().attach(
        AFTER_DISPATCH,
        |event| {
            if let Some(after) = event.payload_mut::<AfterDispatch>() {
                debug!(controller = %after.route.controller_id(), "Handled");
                let controller = after.route.controller_id().to_string();
                after.response.set_header("x-adroit-controller", controller);
            }
            Ok(())
        },
        DEFAULT_PRIORITY,
    );

    let request = Request::new(cli.method.as_str(), &cli.path);

    if cli.resolve_only {
        let resolution = app.resolve(&request);
        println!("language:   {}", resolution.current_language());
        match resolution.route() {
            Some(route) => {
                println!("bundle:     {}", route.bundle());
                println!("controller: {}", route.controller_id());
                println!("presenter:  {}", route.presenter_id());
                println!("action:     {}", route.action_token());
                println!("params:     {:?}", route.params());
            }
            None => println!("no route"),
        }
        return ExitCode::SUCCESS;
    }

    let response = app.handle(&request);
    println!("{}", response.status());
    for (name, value) in response.headers() {
        println!("{name}: {value}");
    }
    println!();
    println!("{}", response.body());

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
