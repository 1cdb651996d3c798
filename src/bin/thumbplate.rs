use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "thumbplate", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a frame into a template image file; PNG goes to stdout.
    Compose(ComposeArgs),
    /// Compose a frame into a template looked up by name in a manifest store.
    Render(RenderArgs),
    /// Compose one frame into many stored templates in parallel.
    Batch(BatchArgs),
    /// List template names in a manifest store.
    List(ListArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Template image (PNG with alpha).
    template: PathBuf,

    /// Frame image.
    frame: PathBuf,

    /// Crop rectangle within the frame: left,top,right,bottom.
    #[arg(allow_hyphen_values = true)]
    crop: String,

    /// Location rectangle within the template: left,top,right,bottom.
    #[arg(allow_hyphen_values = true)]
    location: String,

    /// Write the PNG here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Resampling filter.
    #[arg(long, value_enum, default_value_t = FilterChoice::Lanczos3)]
    filter: FilterChoice,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Template manifest JSON.
    #[arg(long)]
    store: PathBuf,

    /// Template name.
    #[arg(long)]
    name: String,

    /// Frame image.
    #[arg(long)]
    frame: PathBuf,

    /// Crop override; blank uses the stored default.
    #[arg(long, allow_hyphen_values = true)]
    crop: Option<String>,

    /// Location override; blank uses the stored default.
    #[arg(long, allow_hyphen_values = true)]
    location: Option<String>,

    /// Write the PNG here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Resampling filter.
    #[arg(long, value_enum, default_value_t = FilterChoice::Lanczos3)]
    filter: FilterChoice,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Template manifest JSON.
    #[arg(long)]
    store: PathBuf,

    /// Frame image.
    #[arg(long)]
    frame: PathBuf,

    /// Output directory; each thumbnail is written as `<name>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Template to render (repeatable). Defaults to every template in the store.
    #[arg(long = "name")]
    names: Vec<String>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Resampling filter.
    #[arg(long, value_enum, default_value_t = FilterChoice::Lanczos3)]
    filter: FilterChoice,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Template manifest JSON.
    #[arg(long)]
    store: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterChoice {
    Lanczos3,
    CatmullRom,
    Gaussian,
    Triangle,
    Nearest,
}

impl FilterChoice {
    fn compose_options(self) -> thumbplate::ComposeOptions {
        let filter = match self {
            FilterChoice::Lanczos3 => thumbplate::ResampleFilter::Lanczos3,
            FilterChoice::CatmullRom => thumbplate::ResampleFilter::CatmullRom,
            FilterChoice::Gaussian => thumbplate::ResampleFilter::Gaussian,
            FilterChoice::Triangle => thumbplate::ResampleFilter::Triangle,
            FilterChoice::Nearest => thumbplate::ResampleFilter::Nearest,
        };
        thumbplate::ComposeOptions { filter }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::List(args) => cmd_list(args),
    }
}

// Logs go to stderr; stdout is reserved for image bytes.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_bytes(path: &Path, what: &str) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let crop: thumbplate::Rect = args.crop.parse()?;
    let location: thumbplate::Rect = args.location.parse()?;
    let template = read_bytes(&args.template, "template")?;
    let frame = read_bytes(&args.frame, "frame")?;

    let png = thumbplate::compose_with_options(
        &template,
        &frame,
        crop,
        location,
        args.filter.compose_options(),
    )?;
    emit(&png, args.out.as_deref())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let crop = parse_override(args.crop.as_deref())?;
    let location = parse_override(args.location.as_deref())?;
    let store = thumbplate::ManifestTemplateStore::open(&args.store)?;
    let frame = read_bytes(&args.frame, "frame")?;

    let png = thumbplate::render_thumbnail(
        &store,
        &args.name,
        &frame,
        crop,
        location,
        args.filter.compose_options(),
    )?;
    emit(&png, args.out.as_deref())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let store = thumbplate::ManifestTemplateStore::open(&args.store)?;
    let frame = read_bytes(&args.frame, "frame")?;
    let names = if args.names.is_empty() {
        store.names().map(str::to_owned).collect()
    } else {
        args.names
    };

    let items = thumbplate::render_batch(
        &store,
        &names,
        &frame,
        args.filter.compose_options(),
        &thumbplate::BatchThreading {
            threads: args.threads,
        },
    )?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for item in items {
        let path = args.out_dir.join(format!("{}.png", item.name));
        std::fs::write(&path, &item.png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let store = thumbplate::ManifestTemplateStore::open(&args.store)?;
    let mut stdout = std::io::stdout().lock();
    for name in store.names() {
        writeln!(stdout, "{name}")?;
    }
    Ok(())
}

fn parse_override(s: Option<&str>) -> anyhow::Result<Option<thumbplate::Rect>> {
    match s {
        Some(s) => Ok(thumbplate::Rect::parse_override(s)?),
        None => Ok(None),
    }
}

fn emit(png: &[u8], out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(png).context("write png to stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}
