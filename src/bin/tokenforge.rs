use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tokenforge", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a circular token from a portrait image.
    Render(RenderArgs),
    /// Print a preset style as JSON (a starting point for `--style`).
    Styles(StylesArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input portrait image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file. Defaults to `<out-dir>/<name>.<format>`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output directory used when `--out` is not given.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Subject display name, used for the default file name.
    #[arg(long, default_value = "")]
    name: String,

    /// Subject category; picks the preset style.
    #[arg(long, value_enum, default_value_t = KindChoice::Character)]
    kind: KindChoice,

    /// Custom style JSON; overrides `--kind`.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Output edge length in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Zoom on top of the cover fit (1.0 fills the token).
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Horizontal pan in output pixels (+ moves the image right).
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset_x: f64,

    /// Vertical pan in output pixels (+ moves the image down).
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset_y: f64,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,
}

#[derive(Parser, Debug)]
struct StylesArgs {
    /// Subject category.
    #[arg(long, value_enum, default_value_t = KindChoice::Character)]
    kind: KindChoice,

    /// Output edge length in pixels.
    #[arg(long, default_value_t = 512)]
    size: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Character,
    Npc,
    Creature,
}

impl From<KindChoice> for tokenforge::ActorKind {
    fn from(k: KindChoice) -> Self {
        match k {
            KindChoice::Character => Self::Character,
            KindChoice::Npc => Self::Npc,
            KindChoice::Creature => Self::Creature,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Webp,
}

impl From<FormatChoice> for tokenforge::TokenFormat {
    fn from(f: FormatChoice) -> Self {
        match f {
            FormatChoice::Png => Self::Png,
            FormatChoice::Webp => Self::WebP,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Styles(args) => cmd_styles(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_style(args: &RenderArgs) -> anyhow::Result<tokenforge::TokenStyle> {
    let style = match &args.style {
        Some(path) => tokenforge::TokenStyle::from_path(path)
            .with_context(|| format!("load style '{}'", path.display()))?,
        None => tokenforge::ActorKind::from(args.kind)
            .token_style(args.size.unwrap_or(tokenforge::TokenStyle::default().output_size)),
    };
    Ok(match args.size {
        Some(size) if size != style.output_size => style.resized(size),
        _ => style,
    })
}

fn output_path(args: &RenderArgs, format: tokenforge::TokenFormat) -> PathBuf {
    match &args.out {
        Some(p) => p.clone(),
        None => args
            .out_dir
            .join(tokenforge::token_file_name(&args.name, format)),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let source = tokenforge::load_image(&args.in_path)?;
    let style = resolve_style(&args)?;
    let transform = tokenforge::TransformState::new(
        args.scale,
        tokenforge::Vec2::new(args.offset_x, args.offset_y),
    );
    let format = tokenforge::TokenFormat::from(args.format);

    let token = tokenforge::render_token(&source, transform, &style)?;
    let bytes = tokenforge::encode_token(&token, format)?;
    tracing::info!(
        fingerprint = %format!("{:016x}", token.fingerprint()),
        "rendered token"
    );

    let out = output_path(&args, format);
    write_output(&out, &bytes)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write token '{}'", path.display()))
}

fn cmd_styles(args: StylesArgs) -> anyhow::Result<()> {
    let style = tokenforge::ActorKind::from(args.kind).token_style(args.size);
    style.validate()?;
    println!("{}", style.to_json_pretty()?);
    Ok(())
}
