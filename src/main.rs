use clap::{Parser, Subcommand};
use folio::carousel::Carousel;
use folio::config::{self, FolioConfig, Presentation};
use folio::gallery::GalleryStore;
use folio::layout::LayoutParams;
use folio::ratio::{AspectRatioResolver, FsProbe, RatioCache};
use folio::{output, render, scan};
use std::path::{Path, PathBuf};

#[derive(clap::Args, Clone)]
struct ViewportArgs {
    /// Grid container width in pixels
    #[arg(long, default_value_t = 1000)]
    width: u32,

    /// Viewport width in pixels (picks the row height); defaults to --width
    #[arg(long)]
    viewport: Option<u32>,

    /// Reveal this many extra grid pages, as if "Load more" was clicked
    #[arg(long, default_value_t = 0)]
    more: usize,
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Photography portfolio builder")]
#[command(long_about = "\
Photography portfolio builder

The site root holds a gallery manifest, two optional selection lists and the
image directories:

  site/
  ├── folio.toml                   # Config (optional)
  ├── gallery.json                 # Manifest, written by 'folio scan'
  ├── featured.txt                 # Featured strip, one file name per line
  ├── carousel.txt                 # Hero carousel picks
  └── assets/gallery/
      ├── full/                    # Full-size images
      └── thumb/                   # Thumbnails (same names, .jpg)

List lines are matched to manifest photos by file name (case-insensitive).
Lines containing '/' are used as paths verbatim. Blank lines and lines
starting with '#' are ignored. A missing list falls back to the first
photos of the manifest.

'folio scan --source DIR' copies images from DIR into full/ (subfolders
kept) before writing the manifest.

Run 'folio gen-config' to generate a documented folio.toml.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the image directory and write gallery.json
    Scan {
        /// Copy images from this folder into the full-size directory first,
        /// keeping subfolders
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Resolve the manifest and selection lists and report what the page shows
    Check,
    /// Print the justified grid layout for a container width
    Layout(ViewportArgs),
    /// Step the hero carousel and print each frame
    Carousel {
        /// Autoplay steps to simulate
        #[arg(long, default_value_t = 7)]
        steps: usize,

        /// Show five cards (coverflow) regardless of config
        #[arg(long)]
        coverflow: bool,
    },
    /// Render the portfolio page to HTML
    Render {
        #[command(flatten)]
        viewport: ViewportArgs,

        /// Output file, relative to the site root
        #[arg(long, default_value = "index.html")]
        out: PathBuf,
    },
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { source } => {
            let config = config::load_config(&cli.root)?;
            let (manifest, report) = scan::scan_and_write(&cli.root, &config, source.as_deref())?;
            for src in &report.missing_thumbs {
                log::warn!("no thumbnail for {src}");
            }
            output::print_scan_output(&manifest, &report, Path::new(&config.paths.manifest));
        }
        Command::Check => {
            let config = config::load_config(&cli.root)?;
            let store = GalleryStore::load(&cli.root, &config)?;
            output::print_check_output(&store);
        }
        Command::Layout(args) => {
            let config = config::load_config(&cli.root)?;
            let store = load_store(&cli.root, &config, args.more)?;
            let params = layout_params(&config, &args);
            let resolver = fs_resolver(&cli.root, &config);
            let rows = render::layout_grid(&store, &resolver, &params);
            output::print_layout_output(&rows, store.photos(), &params);
        }
        Command::Carousel { steps, coverflow } => {
            let mut config = config::load_config(&cli.root)?;
            if coverflow {
                config.carousel.presentation = Presentation::Coverflow;
            }
            let store = GalleryStore::load(&cli.root, &config)?;
            let mut carousel = Carousel::new(store.carousel_items().to_vec(), &config.carousel);
            output::print_carousel_frame(0, &carousel);
            for step in 1..=steps {
                if !carousel.autoplay_tick() {
                    break;
                }
                output::print_carousel_frame(step, &carousel);
            }
        }
        Command::Render { viewport, out } => {
            let config = config::load_config(&cli.root)?;
            let store = load_store(&cli.root, &config, viewport.more)?;
            let carousel = Carousel::new(store.carousel_items().to_vec(), &config.carousel);
            let params = layout_params(&config, &viewport);
            let resolver = fs_resolver(&cli.root, &config);

            let plan = render::plan_portfolio(&store, &carousel, &resolver, &params);
            let html = render::render_portfolio(&plan).into_string();
            std::fs::write(cli.root.join(&out), html)?;
            output::print_render_output(&plan, &out);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_store(
    root: &Path,
    config: &FolioConfig,
    more: usize,
) -> Result<GalleryStore, folio::gallery::GalleryError> {
    let mut store = GalleryStore::load(root, config)?;
    for _ in 0..more {
        store.load_more();
    }
    Ok(store)
}

fn layout_params(config: &FolioConfig, args: &ViewportArgs) -> LayoutParams {
    LayoutParams::from_config(
        &config.layout,
        args.width,
        args.viewport.unwrap_or(args.width),
    )
}

fn fs_resolver(root: &Path, config: &FolioConfig) -> AspectRatioResolver<FsProbe> {
    AspectRatioResolver::new(FsProbe::new(root), RatioCache::new())
        .with_fallback(config.layout.fallback_aspect_ratio)
}
