mod paths;
mod render;
mod repl;
mod settings;

use std::fs;
use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use schooladmin_lib::SchoolClient;
use schooladmin_lib::api::Resource;
use schooladmin_lib::model::Student;
use schooladmin_lib::model::Teacher;
use schooladmin_lib::page::ListPage;
use schooladmin_lib::page::MemoryHistory;
use schooladmin_lib::page::PageConfig;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::settings::Settings;

const USAGE: &str = "usage: schooladmin <students|teachers> [query]\n\
                     e.g.  schooladmin students 'page=2&sort=phone:desc'";

fn parse_args(args: &[String]) -> Option<(Resource, &str)> {
    let resource = match args.first()?.as_str() {
        "students" => Resource::Students,
        "teachers" => Resource::Teachers,
        _ => return None,
    };
    if args.len() > 2 {
        return None;
    }
    Some((resource, args.get(1).map_or("", String::as_str)))
}

/// Rotates old logs and sends this run's log to `latest.log`.
fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        eprintln!("No cache directory; logging disabled");
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to create log file {}: {}", path.display(), e);
            return;
        }
    };
    if let Err(e) = WriteLogger::init(level, Config::default(), file) {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

/// Terminal width from `$COLUMNS`, defaulting to 80.
fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(80)
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((resource, query)) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let level = match settings.level_filter() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(level);

    let client = match SchoolClient::builder()
        .url(&settings.api_url)
        .api_prefix(&settings.api_prefix)
        .timeout(settings.timeout())
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create client: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Opening {} as {} against {:?}", resource, settings.role, client);

    let config = PageConfig::new(settings.session());
    let history = Arc::new(MemoryHistory::new());
    let screen = render::breakpoint(terminal_columns());

    let result = match resource {
        Resource::Students => {
            let page = ListPage::<Student>::with_client(config, client, history, query);
            repl::run(page, screen).await
        }
        Resource::Teachers => {
            let page = ListPage::<Teacher>::with_client(config, client, history, query);
            repl::run(page, screen).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Input error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
