use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use opengrammar::logging::{init_tracing, log_failure};
use opengrammar::metrics::{analyze_insights, format_minutes, MetricsReport, TextInsights};
use opengrammar::{
    AnalysisResponse, AppError, Config, CorrectionReconciler, FileSurface, MemorySurface, MetricsEngine,
    Notice, NoticeLevel, TextSurface, WritingSession,
};

/// OpenGrammar - apply writing suggestions and inspect text statistics
#[derive(Parser, Debug)]
#[command(name = "opengrammar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/opengrammar/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print document statistics and writing insights
    Stats(StatsArgs),

    /// Apply suggestions from an analysis response
    Apply(ApplyArgs),

    /// List the suggestions an analysis response would offer
    Corrections(CorrectionsArgs),
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Text file to analyze
    file: PathBuf,

    /// Emit JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ApplyArgs {
    /// Text file the analysis was produced for
    file: PathBuf,

    /// Analysis response JSON
    #[arg(short, long)]
    analysis: PathBuf,

    /// Suggestion ids to apply, in order
    #[arg(long = "id")]
    ids: Vec<usize>,

    /// Apply every remaining suggestion
    #[arg(long)]
    all: bool,

    /// Suggestion ids to discard before applying
    #[arg(long)]
    dismiss: Vec<usize>,

    /// Rewrite the file instead of printing the result
    #[arg(long)]
    in_place: bool,
}

#[derive(Args, Debug)]
struct CorrectionsArgs {
    /// Text file the analysis was produced for
    file: PathBuf,

    /// Analysis response JSON
    #[arg(short, long)]
    analysis: PathBuf,
}

#[derive(Serialize)]
struct StatsOutput {
    #[serde(flatten)]
    report: MetricsReport,
    insights: TextInsights,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", AppError::from(e));
            std::process::exit(1);
        }
    };

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));
    debug!("Using config {}", config_path.display());

    let result = match cli.command {
        Command::Stats(args) => stats(args, &config),
        Command::Apply(args) => apply(args, &config),
        Command::Corrections(args) => corrections(args, &config),
    };

    if let Err(err) = result {
        log_failure(&config.log_path, &format!("{:#}", err));
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn read_document(path: &Path) -> opengrammar::Result<String> {
    Ok(FileSurface::new(path).read_text()?)
}

fn load_analysis(path: &Path) -> opengrammar::Result<AnalysisResponse> {
    Ok(AnalysisResponse::from_path(path)?)
}

fn session_for<S: TextSurface>(surface: S, config: &Config) -> WritingSession<S> {
    WritingSession::with_parts(
        surface,
        CorrectionReconciler::with_sentinel(config.no_revision_sentinel.as_str()),
        MetricsEngine::new(config.metrics_options()),
    )
}

fn stats(args: StatsArgs, config: &Config) -> Result<()> {
    let text = read_document(&args.file)?;
    let metrics = MetricsEngine::new(config.metrics_options()).compute(&text);
    let insights = analyze_insights(&text, config.keyword_limit);

    if args.json {
        let output = StatsOutput {
            report: MetricsReport::new(metrics),
            insights,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", args.file.display());
    println!("  Words:          {}", metrics.word_count);
    println!(
        "  Characters:     {} ({} without spaces)",
        metrics.character_count, metrics.characters_no_spaces
    );
    println!("  Sentences:      {}", metrics.sentence_count);
    println!("  Paragraphs:     {}", metrics.paragraph_count);
    println!("  Words/sentence: {}", metrics.average_words_per_sentence);
    println!(
        "  Readability:    {} ({}, grade {})",
        metrics.readability_score,
        metrics.difficulty.label(),
        metrics.grade_level.label()
    );
    println!("  Complexity:     {}", metrics.complexity.label());
    println!(
        "  Reading time:   {} (speaking {})",
        format_minutes(metrics.reading_time_minutes),
        format_minutes(metrics.speaking_time_minutes)
    );
    if !metrics.top_words.is_empty() {
        let top: Vec<String> = metrics
            .top_words
            .iter()
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        println!("  Top words:      {}", top.join(", "));
    }
    println!(
        "  Sentiment:      {:?}, audience {:?}",
        insights.sentiment.sentiment, insights.audience.level
    );
    Ok(())
}

fn apply(args: ApplyArgs, config: &Config) -> Result<()> {
    let response = load_analysis(&args.analysis)?;

    if args.in_place {
        let mut session = session_for(FileSurface::new(&args.file), config);
        run_apply(&mut session, response, &args, config)?;
    } else {
        let text = read_document(&args.file)?;
        let mut session = session_for(MemorySurface::new(text), config);
        run_apply(&mut session, response, &args, config)?;
        print!("{}", session.into_surface().into_text());
    }
    Ok(())
}

fn run_apply<S: TextSurface>(
    session: &mut WritingSession<S>,
    response: AnalysisResponse,
    args: &ApplyArgs,
    config: &Config,
) -> opengrammar::Result<()> {
    let loaded = session.load_analysis(response);
    info!("{} suggestions loaded from {}", loaded, args.analysis.display());

    for id in &args.dismiss {
        if !session.dismiss(*id) {
            eprintln!("Suggestion {} is not pending", id);
        }
    }

    for id in &args.ids {
        let notice = session.accept(*id)?;
        report(&notice, config);
    }

    if args.all {
        let notice = session.accept_all()?;
        report(&notice, config);
    }

    let remaining = session.pending().ids();
    if !remaining.is_empty() {
        eprintln!("Pending suggestions: {:?}", remaining);
    }
    Ok(())
}

fn report(notice: &Notice, config: &Config) {
    eprintln!("{}: {}", notice.title, notice.message);
    if matches!(notice.level, NoticeLevel::Error | NoticeLevel::Warning) {
        log_failure(
            &config.log_path,
            &format!("{}: {}", notice.title, notice.message),
        );
    }
}

fn corrections(args: CorrectionsArgs, config: &Config) -> Result<()> {
    let text = read_document(&args.file)?;
    let mut session = session_for(MemorySurface::read_only(text.as_str()), config);
    session.load_analysis(load_analysis(&args.analysis)?);

    if session.pending().is_empty() {
        println!("No suggestions. The text looks great!");
        return Ok(());
    }

    for correction in session.pending().iter() {
        let location = match correction.position {
            Some(span) => format!("{}..{}", span.start, span.end),
            None => "-".to_string(),
        };
        let stale = correction.position.is_some()
            && correction.span_text(&text) != Some(correction.original_text.as_str());
        println!(
            "[{}] {} {}{}",
            correction.id,
            location,
            correction.category.as_deref().unwrap_or("issue"),
            if stale { " (position stale)" } else { "" }
        );
        println!("    - {}", correction.original_text);
        println!("    + {}", correction.improved_text);
        if let Some(explanation) = &correction.explanation {
            println!("    {}", explanation);
        }
    }
    Ok(())
}
