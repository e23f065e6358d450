//! Voxmood CLI - Voice sentiment analysis command-line interface

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize as _;
use std::path::PathBuf;
use std::process;
use std::str::FromStr as _;
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use voxmood_core::{
    analyze_audio_file, analyze_audio_url, AnalysisConfig, Sentiment, SentimentReport, SpeechModel,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_env_filter(EnvFilter::builder().parse("info")?)
            .compact()
            .without_time()
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    debug!("Command line arguments: {:?}", cli);

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let Some(audio) = cli.audio.clone() else {
        println!("{}\n", ASCII_ART);
        error!("No audio specified. Please provide an audio file or URL to analyze.");
        process::exit(1);
    };

    let is_remote = audio.starts_with("http://") || audio.starts_with("https://");

    // Validate local audio files up front
    if !is_remote && !PathBuf::from(&audio).exists() {
        error!("Audio file not found: {}", audio);
        process::exit(1);
    }

    // Build analysis config
    let mut config = AnalysisConfig::new()
        .with_poll_interval(Duration::from_secs(cli.poll_interval))
        .with_verbose(cli.verbose);

    if let Some(ref api_key) = cli.api_key {
        config = config.with_api_key(api_key.clone());
    }

    if let Some(ref model) = cli.speech_model {
        let speech_model = SpeechModel::from_str(model).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        });
        config = config.with_speech_model(speech_model);
    }

    // Print startup info
    if cli.verbose {
        println!("{}", "Voxmood - Voice Sentiment Analysis".blue().bold());
        println!("Speech model: {}", config.speech_model.as_str());
        println!();
    }

    let spinner = analysis_spinner();

    let result = if is_remote {
        analyze_audio_url(&audio, Some(config)).await
    } else {
        analyze_audio_file(&audio, Some(config)).await
    };

    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed: {}", e);
            process::exit(1);
        }
    };

    // An empty result is informational, not a failure
    if report.is_empty() {
        println!(
            "{} Analysis complete, but no emotional markers were detected. Try a longer audio clip.",
            "Notice:".yellow().bold()
        );
        return Ok(());
    }

    // Prepare output content
    let output_content = match cli.output {
        OutputFormat::Table => render_table(&report),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Csv => report.to_csv(),
    };

    // Write output to file or stdout
    if let Some(output_file) = cli.output_file {
        std::fs::write(&output_file, &output_content)?;
        println!(
            "{} Report written to: {}",
            "Success:".green().bold(),
            output_file.display()
        );
    } else {
        print!("{}", output_content);
    }

    // Print summary if verbose
    if cli.verbose {
        println!();
        println!("{}", "Analysis Summary:".green().bold());
        println!("Sentiment records: {}", report.len());
        if let Some(duration) = report.audio_duration {
            println!("Audio duration: {:.2}s", duration);
        }
        println!("Processing time: {:.2}s", report.processing_time);
        if let Some(id) = &report.transcript_id {
            println!("Transcript id: {}", id);
        }
    }

    Ok(())
}

const ABOUT: &str = "🎙️ Analyze the emotional tone of speech audio";

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = ABOUT)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path or URL of the audio to analyze (when no subcommand)
    #[arg(value_name = "AUDIO")]
    audio: Option<String>,

    /// API key for the transcription service (defaults to ASSEMBLYAI_API_KEY)
    #[arg(short, long)]
    api_key: Option<String>,

    /// Speech model to transcribe with (e.g., universal-3-pro, nano)
    #[arg(short = 'm', long)]
    speech_model: Option<String>,

    /// Output format: table, json, csv
    #[arg(short, long, default_value = "table")]
    output: OutputFormat,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'f', long = "output-file")]
    output_file: Option<PathBuf>,

    /// Seconds to wait between transcript status polls
    #[arg(long, default_value = "3")]
    poll_interval: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Speech model commands
    Models {
        #[command(subcommand)]
        command: ModelCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ModelCommands {
    /// List speech models offered by the service
    List,
    /// Show speech model information
    Info {
        /// Model to show info for (e.g., universal-3-pro, nano)
        #[arg(value_name = "MODEL")]
        model: String,
    },
}

/// Output format options
#[derive(Clone, Debug, clap::ValueEnum)]
enum OutputFormat {
    /// Timestamped emotion log and mood distribution
    Table,
    /// JSON report with metadata
    Json,
    /// CSV export (Time (Sec), Text, Sentiment, Confidence)
    Csv,
}

/// Spinner shown while the service processes the audio
fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Analyzing speech patterns...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Render the timestamped emotion log and the mood distribution
fn render_table(report: &SentimentReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n",
        "Timestamped Emotion Log".blue().bold()
    ));
    for record in &report.records {
        out.push_str(&format!(
            "  [{:>8.2}s] {:<10} {:.2}  {}\n",
            record.time_sec,
            colored_label(record.sentiment),
            record.confidence,
            record.text
        ));
    }

    out.push('\n');
    out.push_str(&format!("{}\n", "Overall Mood".blue().bold()));

    let counts = report.frequency_counts();
    let total = counts.total();
    for (sentiment, count) in counts.entries() {
        let share = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        };
        out.push_str(&format!(
            "  {:<10} {:<24} {:>3} ({:.0}%)\n",
            colored_label(sentiment),
            distribution_bar(count, total, 24),
            count,
            share * 100.0
        ));
    }

    out
}

/// Color a sentiment label with the dashboard palette
fn colored_label(sentiment: Sentiment) -> String {
    match sentiment {
        Sentiment::Positive => sentiment.to_string().green().to_string(),
        Sentiment::Neutral => sentiment.to_string().blue().to_string(),
        Sentiment::Negative => sentiment.to_string().red().to_string(),
    }
}

/// Proportional bar for the mood distribution view
fn distribution_bar(count: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return String::new();
    }
    let filled = (count * width).div_ceil(total).min(width);
    "█".repeat(filled)
}

/// Handle subcommands
fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Models { command } => handle_model_command(command),
    }
}

/// Handle speech model subcommands
fn handle_model_command(command: ModelCommands) -> anyhow::Result<()> {
    match command {
        ModelCommands::List => {
            println!("{}", "Available Speech Models:".blue().bold());
            println!();

            for model in SpeechModel::all_models() {
                let marker = if *model == SpeechModel::default() {
                    " (default)".dimmed().to_string()
                } else {
                    String::new()
                };
                println!(
                    "  {} - {}{}",
                    model.as_str().green(),
                    model.description().dimmed(),
                    marker
                );
            }

            println!();
            println!(
                "{}{}{}",
                "Usage: ".dimmed(),
                env!("CARGO_PKG_NAME").cyan().dimmed(),
                " <AUDIO> --speech-model <model>".cyan().dimmed()
            );
        }

        ModelCommands::Info { model } => {
            let speech_model = SpeechModel::from_str(&model).map_err(|e| {
                anyhow::anyhow!(
                    "Unknown model: {}. Use 'models list' to see available models. Error: {}",
                    model,
                    e
                )
            })?;

            println!("{} Model Information", "Info:".blue().bold());
            println!();
            println!("Name: {}", speech_model.as_str().green().bold());
            println!("Description: {}", speech_model.description());
            println!(
                "Default: {}",
                if speech_model == SpeechModel::default() {
                    "yes".green().to_string()
                } else {
                    "no".red().to_string()
                }
            );
        }
    }

    Ok(())
}

const ASCII_ART: &str = r#"
       .--.
      /  o \     .  .      .   .
     |  ()  |    |\ |      |\ /|
      \    /     | \| o  x | V | o  o  d
       |==|
       |  |
    ___|  |___
   /          \"#;
