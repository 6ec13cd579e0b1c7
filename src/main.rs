use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use memekit::platform::load_image;
use memekit::rendering::{encode_png, pixel_digest};
use memekit::{Compositor, FontSpec, TextStyle};

#[derive(Parser)]
#[command(name = "memekit", version, about = "Put top/bottom captions on a photo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render captions onto an image and write a PNG
    Compose {
        #[command(flatten)]
        input: CaptionArgs,
        /// Output path (defaults to `<stem>-meme.png` next to the input)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the SHA-256 pixel digest of the result
        #[arg(long)]
        digest: bool,
    },
    /// Print where the captions would be drawn, as JSON
    Layout {
        #[command(flatten)]
        input: CaptionArgs,
    },
}

#[derive(Args)]
struct CaptionArgs {
    /// Source image
    image: PathBuf,
    #[arg(short, long, default_value = "")]
    top: String,
    #[arg(short, long, default_value = "")]
    bottom: String,
    /// JSON text style file
    #[arg(long)]
    style: Option<PathBuf>,
    /// TrueType/OpenType font overriding the style's face
    #[arg(long)]
    font: Option<PathBuf>,
    /// Font size in pixels overriding the style's
    #[arg(long)]
    font_size: Option<f32>,
}

impl CaptionArgs {
    fn style(&self) -> Result<TextStyle> {
        let mut style = match &self.style {
            Some(path) => TextStyle::from_json_file(path)
                .with_context(|| format!("loading style {}", path.display()))?,
            None => TextStyle::default(),
        };
        if let Some(font) = &self.font {
            style.font = FontSpec::File(font.clone());
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
            style.min_font_size = style.min_font_size.min(size);
        }
        Ok(style)
    }
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
    input.with_file_name(format!("{}-meme.png", stem))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Compose { input, out, digest } => {
            let compositor = Compositor::new(input.style()?)?;
            let image = load_image(&input.image).with_context(|| format!("reading {}", input.image.display()))?;
            let rendered = compositor.compose(&image, &input.top, &input.bottom)?;

            let out = out.unwrap_or_else(|| default_output(&input.image));
            let encoded = encode_png(&rendered)?;
            std::fs::write(&out, &encoded.png_data).with_context(|| format!("writing {}", out.display()))?;
            log::info!("wrote {} ({}x{})", out.display(), encoded.width, encoded.height);

            if digest {
                println!("{}", pixel_digest(&rendered));
            }
        }
        Command::Layout { input } => {
            let compositor = Compositor::new(input.style()?)?;
            let image = load_image(&input.image).with_context(|| format!("reading {}", input.image.display()))?;
            let layouts = compositor.layout(image.width(), image.height(), &input.top, &input.bottom);
            println!("{}", serde_json::to_string_pretty(&layouts)?);
        }
    }
    Ok(())
}
