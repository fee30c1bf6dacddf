use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use spriteforge::api::{self, PaletteResponse};
use spriteforge::models::{AppConfig, PaletteDto};
use spriteforge::server;
use spriteforge::services::{resolve_palette, ConverterService};

#[derive(Parser)]
#[command(name = "spriteforge")]
#[command(about = "Turn generated character images into pixel-art sprites")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert an image file into a sprite
    Process {
        /// Input image path (PNG, JPEG or WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// YAML configuration file (defaults to $CONFIG_FILE)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Sprite width in pixels
        #[arg(long)]
        width: Option<usize>,

        /// Sprite height in pixels
        #[arg(long)]
        height: Option<usize>,

        /// Maximum number of visible colors
        #[arg(long)]
        colors: Option<usize>,
    },
    /// Resolve and normalize a character palette, printing it as JSON
    Palette {
        /// Free-text vision model reply containing a palette JSON object
        #[arg(long, conflicts_with_all = ["hair", "skin", "top", "bottom", "footwear"])]
        vision_reply: Option<String>,

        /// Hair color (#RRGGBB)
        #[arg(long)]
        hair: Option<String>,

        /// Skin color (#RRGGBB)
        #[arg(long)]
        skin: Option<String>,

        /// Top garment color (#RRGGBB)
        #[arg(long)]
        top: Option<String>,

        /// Bottom garment color (#RRGGBB)
        #[arg(long)]
        bottom: Option<String>,

        /// Footwear color (#RRGGBB)
        #[arg(long)]
        footwear: Option<String>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Spriteforge API",
        description = "Pixel-art post-processing for generated character sprites",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_convert, api::handle_palette),
    components(schemas(
        api::ConvertRequest,
        api::ConvertResponse,
        api::ConvertMetrics,
        api::TransparencyMetrics,
        api::PaletteRequest,
        api::PaletteResponse,
        spriteforge::models::PaletteDto,
        spriteforge::models::PaletteSource,
    )),
    tags(
        (name = "Conversion", description = "Sprite post-processing"),
        (name = "Palette", description = "Character palette normalization")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Process {
            input,
            output,
            config,
            width,
            height,
            colors,
        }) => run_process_command(&input, &output, config, width, height, colors),
        Some(Commands::Palette {
            vision_reply,
            hair,
            skin,
            top,
            bottom,
            footwear,
        }) => run_palette_command(vision_reply, [hair, skin, top, bottom, footwear]),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spriteforge=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
}

/// Convert a PNG file directly (no server needed)
fn run_process_command(
    input: &Path,
    output: &Path,
    config: Option<PathBuf>,
    width: Option<usize>,
    height: Option<usize>,
    colors: Option<usize>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let mut config = AppConfig::load(config_path(config).as_deref());
    if let Some(width) = width {
        config.pipeline.target_width = width;
    }
    if let Some(height) = height {
        config.pipeline.target_height = height;
    }
    if let Some(colors) = colors {
        config.pipeline.max_colors = colors;
    }
    config
        .pipeline
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid pipeline settings: {e}"))?;

    let source = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let converter = ConverterService::from_config(&config);
    let (png, report) = converter.convert(&source)?;

    std::fs::write(output, &png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} ({}x{} from {}x{}, {} colors, {} background pixels removed, {})",
        output.display(),
        config.pipeline.target_width,
        config.pipeline.target_height,
        report.source_width,
        report.source_height,
        report.quantize.output_colors,
        report.background.removed,
        report.final_check.verdict.as_str(),
    );

    Ok(())
}

/// Resolve a palette from a vision reply or explicit colors and print it
fn run_palette_command(
    vision_reply: Option<String>,
    colors: [Option<String>; 5],
) -> anyhow::Result<()> {
    init_cli_tracing();

    let explicit = if colors.iter().any(Option::is_some) {
        let [hair, skin, top, bottom, footwear] = colors;
        let missing = |flag: &str| anyhow::anyhow!("--{flag} is required with explicit colors");
        Some(PaletteDto {
            hair: hair.ok_or_else(|| missing("hair"))?,
            skin: skin.ok_or_else(|| missing("skin"))?,
            top_garment: top.ok_or_else(|| missing("top"))?,
            bottom_garment: bottom.ok_or_else(|| missing("bottom"))?,
            footwear: footwear.ok_or_else(|| missing("footwear"))?,
        })
    } else {
        None
    };

    let (palette, palette_source) = resolve_palette(explicit.as_ref(), vision_reply.as_deref())?;

    let response = PaletteResponse {
        palette: PaletteDto::from(&palette),
        palette_source,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Display status information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Spriteforge v{VERSION}");
    println!("Pixel-art post-processing for generated character sprites\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config = AppConfig::load(config_file.as_deref().map(Path::new));
    println!("\nPipeline:");
    println!(
        "  Sprite size = {}x{}",
        config.pipeline.target_width, config.pipeline.target_height
    );
    println!("  Max colors  = {}", config.pipeline.max_colors);
    println!(
        "  Islands     = {}",
        if config.pipeline.remove_islands {
            "removed"
        } else {
            "kept"
        }
    );

    println!("\nCommands:");
    println!("  spriteforge serve                   Start the HTTP server");
    println!("  spriteforge process -i IN -o OUT    Convert a PNG file");
    println!("  spriteforge palette --vision-reply  Normalize a palette");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "spriteforge=debug,sprite_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_file = config_path(None);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let config = AppConfig::load(config_file.as_deref());
    let state = server::create_app_state(config);

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Spriteforge server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
