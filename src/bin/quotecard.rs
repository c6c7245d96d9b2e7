use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quotecard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one card from a JSON request and write it as a PNG.
    Render(RenderArgs),
    /// List the template catalog.
    Templates,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input request JSON: `{ "category", "style_index", "state" }`.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory the PNG is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Root that relative image references resolve against
    /// (default: `$QUOTECARD_ASSETS_ROOT`, else the request's directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Directory scanned for `.ttf`/`.otf` faces
    /// (default: `$QUOTECARD_FONTS_DIR`, else the assets root).
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Date used in the output file name (default: today).
    #[arg(long)]
    date: Option<chrono::NaiveDate>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RenderRequest {
    category: quotecard::Category,
    #[serde(default)]
    style_index: usize,
    #[serde(default)]
    state: Option<quotecard::RenderState>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Templates => cmd_templates(),
    }
}

fn read_request(path: &Path) -> anyhow::Result<RenderRequest> {
    let f = File::open(path).with_context(|| format!("open request '{}'", path.display()))?;
    let r = BufReader::new(f);
    let req: RenderRequest = serde_json::from_reader(r).with_context(|| "parse request JSON")?;
    Ok(req)
}

fn dir_from_env(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let req = read_request(&args.in_path)?;
    let template = quotecard::templates::get(req.category, req.style_index)?;
    let state = req
        .state
        .unwrap_or_else(|| quotecard::RenderState::for_category(req.category));
    state.validate(template)?;

    let assets_root = args
        .assets_root
        .or_else(|| dir_from_env("QUOTECARD_ASSETS_ROOT"))
        .unwrap_or_else(|| {
            args.in_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf()
        });
    let fonts_dir = args
        .fonts_dir
        .or_else(|| dir_from_env("QUOTECARD_FONTS_DIR"))
        .unwrap_or_else(|| assets_root.clone());

    let settings = quotecard::RenderSettings {
        clear_rgba: Some([0, 0, 0, 255]),
        ..quotecard::RenderSettings::default()
    };
    let text = quotecard::TextLayoutEngine::from_dir(&fonts_dir);
    if text.library().is_empty() {
        anyhow::bail!(
            "no .ttf/.otf fonts found in '{}' (set --fonts-dir or QUOTECARD_FONTS_DIR)",
            fonts_dir.display()
        );
    }
    tracing::info!(dir = %fonts_dir.display(), faces = text.library().len(), "fonts loaded");
    let mut backend = quotecard::CpuBackend::new(settings.clone(), text);
    let loader = quotecard::CachedImageLoader::new(quotecard::FsImageLoader::new(assets_root));
    let ctx = quotecard::RenderContext {
        loader: &loader,
        settings: &settings,
    };

    let outcome = quotecard::render_canvas(
        &mut backend,
        template,
        &state,
        &ctx,
        &quotecard::RenderTicket::detached(),
    );
    let Some(card) = outcome.rendered() else {
        anyhow::bail!("render was superseded");
    };
    for d in &card.diagnostics {
        eprintln!("{} ({:?}): {}", d.phase, d.kind, d.message);
    }

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let out = args
        .out_dir
        .join(quotecard::export_file_name(req.category, date));
    quotecard::export_png(&card.frame, &out)?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_templates() -> anyhow::Result<()> {
    for category in quotecard::Category::ALL {
        println!("{category}");
        for (i, t) in quotecard::templates::templates(category).iter().enumerate() {
            println!("  {i}: {:<12} {:<28} {:?}", t.id, t.name, t.frame_style);
        }
    }
    Ok(())
}
