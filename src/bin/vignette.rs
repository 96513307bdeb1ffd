use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vignette::{Deck, Player, compose_frame, sample_deck};

#[derive(Parser, Debug)]
#[command(name = "vignette", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a deck in a native window and play it.
    Play(PlayArgs),
    /// Validate a deck JSON file.
    Validate(ValidateArgs),
    /// Print one composed frame as JSON.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Deck JSON; plays the built-in greeting when omitted.
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Open in a window instead of fullscreen.
    #[arg(long)]
    windowed: bool,

    /// Scene to start on (1-based).
    #[arg(long)]
    start: Option<usize>,

    /// Start the autoplay timer immediately.
    #[arg(long)]
    autoplay: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Deck JSON to check.
    #[arg(long)]
    deck: PathBuf,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Deck JSON; dumps the built-in greeting when omitted.
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Scene index to land on (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Viewport width in logical pixels used for layout classification.
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Milliseconds of playback to simulate before composing.
    #[arg(long, default_value_t = 0)]
    at_ms: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn load_deck(path: Option<&PathBuf>) -> anyhow::Result<Deck> {
    match path {
        Some(path) => {
            Deck::from_path(path).with_context(|| format!("load deck '{}'", path.display()))
        }
        None => Ok(sample_deck()),
    }
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let deck = load_deck(args.deck.as_ref())?;
    let start_index = args.start.map(|s| s.saturating_sub(1));
    vignette::ui::run(deck, args.windowed, start_index, args.autoplay)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let deck = Deck::from_path(&args.deck)
        .with_context(|| format!("validate deck '{}'", args.deck.display()))?;
    eprintln!("ok: {} ({} scenes)", deck.title, deck.scene_count());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let deck = load_deck(args.deck.as_ref())?;
    let t0 = Instant::now();

    let mut player = Player::new(deck, t0)?;
    player.set_viewport_width(args.width);
    player.jump_to(args.index, t0);

    let now = t0 + Duration::from_millis(args.at_ms);
    player.tick(now);

    let frame = compose_frame(&player, now);
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}
