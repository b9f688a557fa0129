use clap::{Parser, Subcommand, ValueEnum};
use figure_composer::viewport::{ExecutionContext, FixedSurface};
use figure_composer::{MountedFigure, config, output, render, schema};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "figure-composer")]
#[command(about = "Compose a responsive figure from its configuration")]
#[command(long_about = "\
Compose a responsive figure from its configuration

A figure is an image with an optional mobile variant, caption, link and
layout shell. Config files are layered in order on top of the stock
defaults, so a shared defaults file can be combined with per-figure files.

Example figure.toml:

  block_class = \"home\"
  caption = \"Summer sale\"
  embedding = \"wrapper-only\"
  loading = true

  [image]
  desktop_url = \"banner-desktop.jpg\"
  mobile_url = \"banner-mobile.jpg\"
  desktop_width = 1920
  desktop_height = 600

  [link]
  url = \"/sale\"

Without --viewport-width the figure renders as on a server (viewport
unknown, desktop defaults). With it, the post-paint probe runs once and the
figure re-renders with the mobile or desktop classification.

Run 'figure-composer gen-config' to print a documented config.")]
#[command(version)]
struct Cli {
    /// Log decisions at info level (otherwise RUST_LOG applies)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a figure from one or more layered config files
    Render {
        /// Config file (TOML, or JSON by extension); repeat to layer
        #[arg(long = "config", short = 'c', required = true)]
        configs: Vec<PathBuf>,
        /// Simulate a client viewport of this width in CSS pixels
        #[arg(long)]
        viewport_width: Option<u32>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },
    /// Print the editor schema as JSON
    Schema,
    /// Print a stock config with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Json,
    Tree,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Render {
            configs,
            viewport_width,
            format,
        } => {
            let figure_config = config::load_config(&configs)?;
            let mut figure = MountedFigure::mount(&figure_config);
            if let Some(width) = viewport_width {
                let surface = FixedSurface(width);
                figure.after_paint(ExecutionContext::Client(&surface));
            }
            tracing::info!(
                layers = configs.len(),
                viewport = ?figure.viewport(),
                renders = figure.render_count(),
                "Figure composed"
            );

            let tree = figure.tree();
            match format {
                Format::Html => println!("{}", render::to_html(tree)),
                Format::Json => println!("{}", serde_json::to_string_pretty(tree)?),
                Format::Tree => output::print_tree(tree),
            }
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&schema::editor_schema())?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
