use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use log::LevelFilter;
use pdf_notes::{ConversionStatistics, Emoji, LayoutOptions, Rgb};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfn",
    about = "Stack lecture slides on letter pages with room for notes",
    version
)]
struct Cli {
    /// Input PDF file
    input: PathBuf,

    /// Output PDF file [default: <input>_notes.pdf]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Slides per page (1-10) [default: 5]
    #[arg(short, long)]
    slides: Option<usize>,

    /// Fraction of the page width kept for notes [default: 0.3]
    #[arg(short = 'n', long)]
    note_space: Option<f32>,

    /// Label shown in the notes header
    #[arg(short, long)]
    label: Option<String>,

    /// Emoji shown in the notes header
    #[arg(long, value_enum)]
    emoji: Option<EmojiArg>,

    /// Draw a border around each slide
    #[arg(short, long)]
    borders: bool,

    /// Hide page numbers
    #[arg(long)]
    no_page_numbers: bool,

    /// Hide slide numbers
    #[arg(long)]
    no_slide_numbers: bool,

    /// Hide the line between slides and notes
    #[arg(long)]
    no_separator: bool,

    /// Separator color as "r,g,b" with components from 0 to 1
    #[arg(long)]
    separator_color: Option<String>,

    /// Number printed on the first output page [default: 1]
    #[arg(long)]
    page_start: Option<usize>,

    /// Load options from a JSON file, flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Overwrite the output file without asking
    #[arg(short = 'y', long)]
    yes: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum EmojiArg {
    Brain,
    Rocket,
    Star,
    Fire,
    Book,
}

impl From<EmojiArg> for Emoji {
    fn from(arg: EmojiArg) -> Self {
        match arg {
            EmojiArg::Brain => Self::Brain,
            EmojiArg::Rocket => Self::Rocket,
            EmojiArg::Star => Self::Star,
            EmojiArg::Fire => Self::Fire,
            EmojiArg::Book => Self::Book,
        }
    }
}

impl Cli {
    /// Config file (or defaults) with the command line flags applied on top
    async fn layout_options(&self) -> Result<LayoutOptions> {
        let mut options = match &self.config {
            Some(path) => LayoutOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => LayoutOptions::default(),
        };

        if let Some(slides) = self.slides {
            options.slides_per_page = slides;
        }
        if let Some(note_space) = self.note_space {
            options.note_fraction = note_space;
        }
        if let Some(label) = &self.label {
            options.label = Some(label.clone());
        }
        if let Some(emoji) = self.emoji {
            options.emoji = Some(emoji.into());
        }
        if let Some(color) = &self.separator_color {
            options.separator_color = color
                .parse::<Rgb>()
                .context("Invalid --separator-color")?;
        }
        if let Some(start) = self.page_start {
            options.page_number_start = start;
        }
        if self.borders {
            options.show_borders = true;
        }
        if self.no_page_numbers {
            options.show_page_numbers = false;
        }
        if self.no_slide_numbers {
            options.show_slide_numbers = false;
        }
        if self.no_separator {
            options.show_separator = false;
        }

        options.validate()?;
        Ok(options)
    }

    /// Resolved options, written to `--save-config` before any other work
    async fn effective_options(&self) -> Result<LayoutOptions> {
        let options = self.layout_options().await?;

        if let Some(path) = &self.save_config {
            options
                .save(path)
                .await
                .with_context(|| format!("Failed to save config {}", path.display()))?;
            println!("Saved options → {}", path.display());
        }

        Ok(options)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_statistics(stats: &ConversionStatistics) {
    println!("Notes Layout Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Slides per page: {}", stats.slides_per_page);
    println!("  Slides on last page: {}", stats.last_page_slides);
    println!("  Note space: {}%", stats.note_percent);
    println!("  Page reduction: {:.0}%", stats.reduction_percent);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.effective_options().await?;
    let output = pdf_notes::resolve_output_path(&cli.input, cli.output.as_deref())?;

    let document = pdf_notes::load_pdf(&cli.input)
        .await
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;

    let stats = pdf_notes::calculate_statistics(document.get_pages().len(), &options)?;
    if cli.stats_only {
        print_statistics(&stats);
        return Ok(());
    }

    if !cli.yes && tokio::fs::try_exists(&output).await? {
        let overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} already exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Cancelled");
            return Ok(());
        }
    }

    let (converted, report) = pdf_notes::convert(&document, &options).await?;
    pdf_notes::save_pdf(converted, &output)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Notes layout → {}", output.display());
    print_statistics(&stats);
    for skipped in &report.skipped {
        println!("  Skipped slide {}: {}", skipped.index + 1, skipped.reason);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_config_with_stats_only() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = temp_dir.path().join("notes.json");

        let cli = Cli::try_parse_from([
            "pdfn",
            "missing.pdf",
            "--stats-only",
            "-s",
            "3",
            "--emoji",
            "star",
            "--save-config",
            config.to_str().unwrap(),
        ])
        .unwrap();

        // Saved even though the input is never opened
        let options = cli.effective_options().await.unwrap();
        let saved = LayoutOptions::load(&config).await.unwrap();
        assert_eq!(saved, options);
        assert_eq!(saved.slides_per_page, 3);
        assert_eq!(saved.emoji, Some(Emoji::Star));
    }

    #[tokio::test]
    async fn test_flags_override_config_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = temp_dir.path().join("base.json");
        std::fs::write(&config, r#"{ "slides_per_page": 4, "show_borders": true }"#).unwrap();

        let cli = Cli::try_parse_from([
            "pdfn",
            "lecture.pdf",
            "--config",
            config.to_str().unwrap(),
            "-s",
            "6",
            "--no-separator",
        ])
        .unwrap();

        let options = cli.effective_options().await.unwrap();
        assert_eq!(options.slides_per_page, 6);
        assert!(options.show_borders);
        assert!(!options.show_separator);
    }
}
