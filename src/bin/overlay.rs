use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use overlay::{
    Colour, FillMode, FontSource, Format, InputSource, OutputTarget, OverlayError,
    OverlaySelection, OverlaySpec, Point, RasterImage, STDIO_SENTINEL, Size, TextSpec, composite,
    decode_image, encode_image, fill_rect, new_canvas,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "overlay", version, about = "Superimpose text or images onto an image")]
struct Cli {
    /// Raise log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new image of the given size filled with one colour.
    #[command(visible_alias = "c")]
    Canvas(CanvasArgs),
    /// Draw a rectangle onto an image.
    #[command(visible_alias = "q")]
    Square(SquareArgs),
    /// Superimpose an image onto an image.
    #[command(visible_alias = "i")]
    Image(ImageArgs),
    /// Write text onto an image.
    #[command(visible_alias = "t")]
    Text(TextArgs),
    /// Add either text or an image, whichever is given.
    #[command(visible_alias = "o")]
    Overlay(OverlayArgs),
    /// Show the command version and exit.
    #[command(visible_alias = "v")]
    Version,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output file, or - for STDOUT.
    #[arg(short, long, default_value = STDIO_SENTINEL)]
    output: String,

    /// Output format for STDOUT; a file's extension takes precedence.
    #[arg(short = 'x', long, default_value_t = Format::Png)]
    format: Format,
}

impl OutputArgs {
    fn resolve(&self) -> anyhow::Result<(OutputTarget, Format)> {
        let target = OutputTarget::from_arg(&self.output);
        let format = target.resolve_format(self.format)?;
        tracing::debug!(output = %target, %format, "output stream ready");
        Ok((target, format))
    }
}

#[derive(Args, Debug)]
struct CanvasArgs {
    /// Canvas size as width,height.
    #[arg(short, long)]
    size: Size,

    /// Fill colour.
    #[arg(short, long, default_value = "#FFFFFF")]
    colour: Colour,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args, Debug)]
struct SquareArgs {
    /// Input file, or - for STDIN.
    #[arg(short, long, default_value = STDIO_SENTINEL)]
    input: String,

    /// Top-left corner as x,y.
    #[arg(short, long, default_value = "0,0", allow_hyphen_values = true)]
    point: Point,

    /// Rectangle size as width,height.
    #[arg(short, long, default_value = "0,0")]
    size: Size,

    /// Rectangle colour.
    #[arg(short, long, default_value = "#000000")]
    colour: Colour,

    /// Replace the covered pixels instead of blending over them.
    #[arg(short, long)]
    fill: bool,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args, Debug)]
struct ImageArgs {
    /// Input file, or - for STDIN.
    #[arg(short, long, default_value = STDIO_SENTINEL)]
    input: String,

    /// Image to superimpose.
    #[arg(short = 'y', long)]
    image: PathBuf,

    /// Top-left corner of the superimposed image as x,y.
    #[arg(short, long, default_value = "0,0", allow_hyphen_values = true)]
    point: Point,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args, Debug)]
struct TextStyleArgs {
    /// Baseline origin of the text as x,y.
    #[arg(short, long, default_value = "0,0", allow_hyphen_values = true)]
    point: Point,

    /// OpenType/TrueType font file; the bundled face is used when absent.
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Text colour.
    #[arg(short, long, default_value = "#000000")]
    colour: Colour,

    /// Font size in points.
    #[arg(short, long, default_value_t = 12.0)]
    size: f64,

    /// Resolution in dots per inch.
    #[arg(short, long, default_value_t = 72.0)]
    dpi: f64,
}

impl TextStyleArgs {
    fn text_spec(&self, content: String) -> anyhow::Result<TextSpec> {
        Ok(TextSpec {
            content,
            font: FontSource::load(self.font.as_deref())?,
            size: self.size,
            dpi: self.dpi,
            colour: self.colour,
            anchor: self.point,
        })
    }
}

#[derive(Args, Debug)]
struct TextArgs {
    /// Input file, or - for STDIN.
    #[arg(short, long, default_value = STDIO_SENTINEL)]
    input: String,

    /// Text to write.
    #[arg(short, long)]
    text: String,

    #[command(flatten)]
    style: TextStyleArgs,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args, Debug)]
struct OverlayArgs {
    /// Input file, or - for STDIN.
    #[arg(short, long, default_value = STDIO_SENTINEL)]
    input: String,

    /// Text to write.
    #[arg(short, long)]
    text: Option<String>,

    /// Image to superimpose.
    #[arg(short = 'y', long)]
    image: Option<PathBuf>,

    #[command(flatten)]
    style: TextStyleArgs,

    #[command(flatten)]
    out: OutputArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Canvas(args) => cmd_canvas(args),
        Command::Square(args) => cmd_square(args),
        Command::Image(args) => cmd_image(args),
        Command::Text(args) => cmd_text(args),
        Command::Overlay(args) => cmd_overlay(args),
        Command::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // stdout may carry the encoded image
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_canvas(args: CanvasArgs) -> anyhow::Result<()> {
    tracing::debug!("running canvas command");
    let (target, format) = args.out.resolve()?;
    let canvas = new_canvas(args.size, args.colour)?;
    tracing::debug!(size = %args.size, colour = %args.colour, "canvas filled");
    write_image(&canvas, &target, format)
}

fn cmd_square(args: SquareArgs) -> anyhow::Result<()> {
    tracing::debug!("running square command");
    let (target, format) = args.out.resolve()?;
    let mut dst = read_underlay(&args.input)?;

    let mode = if args.fill {
        FillMode::Src
    } else {
        FillMode::Over
    };
    fill_rect(&mut dst, args.point, args.size, args.colour, mode);
    tracing::debug!(
        point = %args.point,
        size = %args.size,
        colour = %args.colour,
        ?mode,
        "square overlaid on the image"
    );
    write_image(&dst, &target, format)
}

fn cmd_image(args: ImageArgs) -> anyhow::Result<()> {
    tracing::debug!("running image command");
    let (target, format) = args.out.resolve()?;
    let underlay = read_underlay(&args.input)?;
    let overlay = read_overlay_image(&args.image)?;
    let dst = composite(
        &underlay,
        &OverlaySpec::Image {
            image: overlay,
            at: args.point,
        },
    )?;
    write_image(&dst, &target, format)
}

fn cmd_text(args: TextArgs) -> anyhow::Result<()> {
    tracing::debug!("running text command");
    if args.text.is_empty() {
        return Err(OverlayError::MissingOverlay.into());
    }
    let (target, format) = args.out.resolve()?;
    let spec = args.style.text_spec(args.text)?;
    let underlay = read_underlay(&args.input)?;
    let dst = composite(&underlay, &OverlaySpec::Text(spec))?;
    write_image(&dst, &target, format)
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    tracing::debug!("running overlay command");
    let selection = OverlaySelection::resolve(args.text.as_deref(), args.image.as_deref())?;
    let (target, format) = args.out.resolve()?;

    let overlay = match selection {
        OverlaySelection::Text(content) => OverlaySpec::Text(args.style.text_spec(content)?),
        OverlaySelection::Image(path) => OverlaySpec::Image {
            image: read_overlay_image(&path)?,
            at: args.style.point,
        },
    };
    let underlay = read_underlay(&args.input)?;
    let dst = composite(&underlay, &overlay)?;
    write_image(&dst, &target, format)
}

fn read_underlay(input: &str) -> anyhow::Result<RasterImage> {
    let source = InputSource::from_arg(input);
    let bytes = source.read_all()?;
    let img =
        decode_image(&bytes).with_context(|| format!("decode underlay image '{source}'"))?;
    tracing::debug!(name = %source, width = img.width(), height = img.height(), "underlay image decoded");
    Ok(img)
}

fn read_overlay_image(path: &Path) -> anyhow::Result<RasterImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read overlay image '{}'", path.display()))?;
    let img = decode_image(&bytes)
        .with_context(|| format!("decode overlay image '{}'", path.display()))?;
    tracing::debug!(name = %path.display(), width = img.width(), height = img.height(), "overlay image decoded");
    Ok(img)
}

fn write_image(img: &RasterImage, target: &OutputTarget, format: Format) -> anyhow::Result<()> {
    let bytes = encode_image(img, format)
        .with_context(|| format!("encode output image '{target}' as {format}"))?;
    target.write_all(&bytes)?;
    if let Some(path) = target.path() {
        tracing::info!(name = %path.display(), %format, "wrote output image");
    }
    Ok(())
}
