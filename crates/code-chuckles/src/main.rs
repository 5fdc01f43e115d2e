//! Terminal front-end for the joke bot.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::pin::pin;
use std::time::Duration;

use code_chuckles::command::{self, Command, CommandError};
use code_chuckles::config::AppConfig;
use code_chuckles::core::settings::Model;
use code_chuckles::core::{ChatSession, ChatSessionBuilder};
use code_chuckles::view;
use code_chuckles_openai_model::OpenAIProvider;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{self, AsyncBufReadExt, BufReader, Stdin};
use tokio::select;
use tokio::signal;
use tokio::time::sleep;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    debug!("starting with {config:?}");

    let model_provider = OpenAIProvider::new(config.openai_config());
    let mut builder = ChatSessionBuilder::with_model_provider(model_provider);
    if let Some(timeout) = config.timeout() {
        builder = builder.with_timeout(timeout);
    }
    let mut session = builder.build();

    let progress_style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let mut stdin = BufReader::new(io::stdin());

    redraw(&session, None);

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let line = select! {
            line = read_line(&mut stdin) => line,
            _ = signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                let notice = view::render_notice(&err.to_string());
                redraw(&session, Some(&notice));
                continue;
            }
        };

        match command {
            Command::Chat(input) => {
                let notice = run_turn(&mut session, &input, &progress_style)
                    .await
                    .map(view::render_notice);
                redraw(&session, notice.as_deref());
            }
            Command::ListModels => {
                let models: Vec<_> = Model::ALL.iter().map(Model::id).collect();
                let notice = format!("Models: {}", models.join(", "));
                redraw(&session, Some(&view::render_notice(&notice)));
            }
            Command::SetModel(model) => {
                session.set_model(model);
                redraw(&session, None);
            }
            Command::SetTemperature(change) => {
                let temperature = change.apply(session.settings().temperature);
                session.set_temperature(temperature);
                redraw(&session, None);
            }
            Command::Clear => {
                let notice = session
                    .clear()
                    .err()
                    .map(|err| view::render_notice(&err.to_string()));
                redraw(&session, notice.as_deref());
            }
            Command::Help => {
                redraw(&session, Some(&view::render_help()));
            }
            Command::Quit => break,
        }
    }

    println!();
}

/// Runs one turn: shows the user message, waits for the reply and
/// returns a notice to show after the redraw, if any.
async fn run_turn(
    session: &mut ChatSession,
    input: &str,
    progress_style: &ProgressStyle,
) -> Option<&'static str> {
    let pending = match session.begin_turn(input) {
        Ok(pending) => pending,
        Err(err) => {
            warn!("submission refused: {err}");
            return Some("Please wait for the current reply.");
        }
    };

    // Show the user message immediately.
    print!("{}", view::render_message(pending.user_message()));
    std::io::stdout().flush().ok();

    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(progress_style.clone());
    progress_bar.set_message("🤔 Thinking...");

    let turn = {
        let mut reply_fut = pin!(session.complete_turn(pending));
        let mut ctrl_c = pin!(signal::ctrl_c());
        loop {
            progress_bar.inc(1);
            select! {
                turn = &mut reply_fut => break Some(turn),
                _ = &mut ctrl_c => break None,
                _ = sleep(Duration::from_millis(100)) => continue,
            }
        }
    };

    // Finish the progress bar before printing anything else.
    progress_bar.finish_and_clear();

    match turn {
        Some(turn) => {
            debug!("turn finished, fallback: {}", turn.is_fallback);
            None
        }
        None => {
            session.abort_turn();
            Some("Cancelled.")
        }
    }
}

fn redraw(session: &ChatSession, footer: Option<&str>) {
    let out = view::render_frame(
        session.transcript().all(),
        session.settings(),
        footer,
    );
    print!("{out}");
    std::io::stdout().flush().ok();
}

async fn read_line(stdin: &mut BufReader<Stdin>) -> Option<String> {
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
