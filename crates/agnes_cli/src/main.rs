use agnes_cli::cli::{Cli, collect_overrides};
use agnes_core::config::{expand_alias, load_config};
use agnes_core::error::AppError;
use agnes_core::logging;
use agnes_core::session::{Reply, Session};
use agnes_core::storage::{Storage, store_path};
use agnes_core::ui;
use clap::Parser;
use std::collections::HashMap;
use std::io::{self, BufRead};

const SEPARATOR: &str = "____________________________________________________________";

struct Output {
    json: bool,
}

impl Output {
    fn print_messages(&self, messages: &[String]) {
        if self.json {
            print_json(messages, None, false);
            return;
        }

        println!("{SEPARATOR}");
        for message in messages {
            println!("{message}");
        }
        println!("{SEPARATOR}");
    }

    fn print_reply(&self, reply: &Reply) {
        if self.json {
            print_json(&reply.messages, reply.error.as_ref(), reply.exit);
            return;
        }

        match reply.error.as_ref() {
            Some(err) => eprintln!("ERROR: {}", err),
            None => self.print_messages(&reply.messages),
        }
    }
}

fn print_json(messages: &[String], error: Option<&AppError>, exit: bool) {
    let json = serde_json::json!({
        "ok": error.is_none(),
        "code": error.map(AppError::code),
        "messages": messages,
        "exit": exit,
    });
    println!("{}", json);
}

struct App {
    session: Session,
    aliases: HashMap<String, String>,
    output: Output,
}

fn start(cli: &Cli) -> Result<App, AppError> {
    let overrides = collect_overrides(&cli.config_override)?;
    let loaded = load_config();
    let config = loaded.config.with_overrides(overrides);

    logging::init_logging(config.log_level())?;
    if let Some(err) = loaded.warning {
        log::warn!("ignoring config file: {err}");
    }

    let path = store_path(cli.store.as_deref(), config.store_path.as_deref());
    log::debug!("using task file {}", path.display());
    let session = Session::open(Storage::new(path))?;

    Ok(App {
        session,
        aliases: config.aliases,
        output: Output { json: cli.json },
    })
}

fn run_line(app: &mut App, line: &str) -> Reply {
    let expanded = expand_alias(line, &app.aliases);
    let reply = app.session.respond(&expanded);
    app.output.print_reply(&reply);
    reply
}

fn run_interactive(app: &mut App) -> Result<(), AppError> {
    app.output.print_messages(&ui::welcome());

    let mut input = Vec::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_until(b'\n', &mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        // Undecodable bytes become U+FFFD.
        let decoded = String::from_utf8_lossy(&input);
        let line = decoded.trim();
        if line.is_empty() {
            continue;
        }

        if run_line(app, line).exit {
            break;
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let mut app = match start(&cli) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };

    match cli.one_shot() {
        Some(line) => {
            if run_line(&mut app, &line).is_error() {
                std::process::exit(1);
            }
        }
        None => {
            if let Err(err) = run_interactive(&mut app) {
                eprintln!("ERROR: {}", err);
                std::process::exit(1);
            }
        }
    }
}
