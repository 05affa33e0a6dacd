//! # Quizring Demo
//!
//! Drives a results view with a simulated 60 Hz frame clock and prints what a
//! host canvas would be asked to draw.
//!
//! ```text
//! quizring_demo --correct 8 --total 10 --seconds 125 --subject Math
//! quizring_demo --config results.toml --json
//! RUST_LOG=quizring_ui=trace quizring_demo
//! ```

use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use quizring_core::{QuizError, QuizOutcome, QuizResult};
use quizring_ui::{
    load_results_config, Color, Point, RenderCommand, ResultsView, ResultsViewConfig,
    SlotContent, TextAlign, TextStyle, Widget, WidgetId,
};
use tracing_subscriber::EnvFilter;

/// One frame at 60 Hz.
const FRAME: Duration = Duration::from_micros(16_667);

/// Extra time simulated past the configured animation before giving up.
const GRACE: Duration = Duration::from_secs(1);

struct Options {
    correct: i64,
    total: i64,
    seconds: i64,
    subject: String,
    config: Option<String>,
    json: bool,
    tap: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("Usage: quizring_demo [options]");
    println!();
    println!("Options:");
    println!("  --correct <n>    Correct answers (default 8)");
    println!("  --total <n>      Questions asked (default 10)");
    println!("  --seconds <n>    Time taken (default 125)");
    println!("  --subject <name> Subject name (default Math)");
    println!("  --config <file>  TOML results view configuration");
    println!("  --json           Print the result as JSON");
    println!("  --tap            Tap the View Answers button once settled");
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_number(args: &[String], flag: &str, default: i64) -> Result<i64, String> {
    match flag_value(args, flag) {
        Some(text) => text
            .parse()
            .map_err(|_| format!("{flag} expects a whole number, got {text:?}")),
        None if args.iter().any(|a| a == flag) => Err(format!("{flag} needs a value")),
        None => Ok(default),
    }
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    Ok(Options {
        correct: parse_number(args, "--correct", 8)?,
        total: parse_number(args, "--total", 10)?,
        seconds: parse_number(args, "--seconds", 125)?,
        subject: flag_value(args, "--subject").unwrap_or("Math").to_owned(),
        config: flag_value(args, "--config").map(str::to_owned),
        json: args.iter().any(|a| a == "--json"),
        tap: args.iter().any(|a| a == "--tap"),
    })
}

fn perfect_score_banner(result: &QuizResult) -> SlotContent {
    if !result.is_perfect() {
        return SlotContent::default();
    }
    SlotContent {
        height: 24.0,
        commands: vec![RenderCommand::Text {
            text: "Perfect score!".into(),
            position: Point::new(0.0, 12.0),
            align: TextAlign::Left,
            style: TextStyle::new(Color::CORRECT_GREEN, 18.0, true),
        }],
    }
}

fn run(options: &Options) -> QuizOutcome<()> {
    let result = QuizResult::new(
        options.correct,
        options.total,
        options.seconds,
        options.subject.as_str(),
    )?;
    println!("{result}");
    if options.json {
        println!("{}", result.to_json_pretty()?);
    }

    let config = match &options.config {
        Some(path) => load_results_config(path)?,
        None => ResultsViewConfig::default(),
    };
    let budget = config.chart.animation_duration() + GRACE;

    let taps = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&taps);
    let mut view = ResultsView::new(WidgetId::new(1), result, config)
        .with_footer(perfect_score_banner)
        .on_view_answers(move || counter.set(counter.get() + 1));
    view.start()?;

    let mut elapsed = Duration::ZERO;
    let mut painted = 0_u32;
    let mut last = Vec::new();
    loop {
        view.tick(elapsed);
        let mut commands = Vec::new();
        if view.paint(&mut commands) {
            painted += 1;
            last = commands;
            if painted % 15 == 1 {
                let label = view.chart().label();
                tracing::info!(
                    elapsed = ?elapsed,
                    label = label.as_deref().unwrap_or("-"),
                    "frame"
                );
            }
        }
        if view.chart().is_settled() {
            break;
        }
        if elapsed > budget {
            return Err(QuizError::PreconditionViolation(format!(
                "animation did not settle within {budget:?}"
            )));
        }
        elapsed += FRAME;
    }

    println!(
        "settled after {painted} painted frames ({:.2}s)",
        elapsed.as_secs_f32()
    );
    for command in &last {
        println!("  {command:?}");
    }

    if options.tap {
        if let Some(button) = view.layout().button {
            view.handle_tap(button.center());
        }
        println!("view answers tapped {} time(s)", taps.get());
    }

    view.dispose();
    Ok(())
}
