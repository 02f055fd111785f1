//! Draw command implementation.

use serde::Serialize;

use wildflower::{grow_plant, Bounds, Color, FlowerHead, Petal, Plant, Point, SessionConfig, StemKind, SvgSurface};

use super::common::{parse_value, take_value, write_output, CliError, SeededSource, SessionArgs};

/// Padding around the plant when cropping.
const CROP_MARGIN: f64 = 10.0;
const DEFAULT_PNG_SCALE: f64 = 1.0;
const BACKGROUND: Color = Color::rgb(255, 255, 255);

/// Parsed `draw` arguments.
#[derive(Debug, Default)]
struct DrawArgs {
    session: SessionArgs,
    output: Option<String>,
    png: Option<String>,
    png_scale: Option<f64>,
    json: bool,
    crop: bool,
    quiet: bool,
    help: bool,
}

impl DrawArgs {
    fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut parsed = DrawArgs::default();
        let mut i = 0;
        while i < args.len() {
            if parsed.session.accept(args, &mut i)? {
                i += 1;
                continue;
            }
            match args[i].as_str() {
                "-o" | "--output" => parsed.output = Some(take_value(args, &mut i)?.to_string()),
                "--png" => parsed.png = Some(take_value(args, &mut i)?.to_string()),
                "--png-scale" => parsed.png_scale = Some(parse_value(args, &mut i)?),
                "--json" => parsed.json = true,
                "--crop" => parsed.crop = true,
                "-q" | "--quiet" => parsed.quiet = true,
                "-h" | "--help" => parsed.help = true,
                other => return Err(CliError::UnknownFlag(other.to_string())),
            }
            i += 1;
        }

        if let Some(scale) = parsed.png_scale {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(CliError::BadValue {
                    flag: "--png-scale".to_string(),
                    value: scale.to_string(),
                });
            }
        }
        Ok(parsed)
    }
}

/// Execute the draw command.
pub fn cmd_draw(args: &[String]) -> Result<(), CliError> {
    let opts = DrawArgs::parse(args)?;
    if opts.help {
        print_usage();
        return Ok(());
    }

    let seed = opts.session.resolve_seed()?;
    let mut rng = SeededSource::new(seed);
    let config = opts.session.build(&mut rng)?;
    let plant = grow_plant(&config, &mut rng);

    if !opts.quiet {
        eprintln!("Growing plant...");
        eprintln!("  Seed: {}", seed);
        eprintln!("  Canvas: {} × {}", config.canvas.width, config.canvas.height);
        eprintln!(
            "  Max rotation: {:.3} rad, branch chance: {:.3}",
            config.max_rotation, config.branch_chance
        );
        print_summary(&plant);
    }

    let frame = if opts.crop {
        plant.bounds().expand(CROP_MARGIN)
    } else {
        Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: config.canvas.width,
            max_y: config.canvas.height,
        }
    };

    let svg = render_svg(&plant, frame);

    let payload = if opts.json {
        let output = JsonOutput::new(&plant, &config, seed);
        serde_json::to_string_pretty(&output).map_err(|e| CliError::Encode(e.to_string()))? + "\n"
    } else {
        svg.clone()
    };
    write_output(opts.output.as_deref(), &payload)?;
    if !opts.quiet {
        if let Some(path) = opts.output.as_deref().filter(|p| *p != "-") {
            eprintln!("Wrote: {}", path);
        }
    }

    if let Some(png_path) = &opts.png {
        let (width, height) = generate_png(&svg, png_path, opts.png_scale.unwrap_or(DEFAULT_PNG_SCALE))?;
        if !opts.quiet {
            eprintln!("Wrote: {} ({}x{})", png_path, width, height);
        }
    }

    Ok(())
}

/// Paint `plant` into an SVG document framed by `frame`.
fn render_svg(plant: &Plant, frame: Bounds) -> String {
    let mut surface = SvgSurface::new()
        .with_view_box(frame)
        .with_background(BACKGROUND);
    plant.draw(&mut surface);
    surface.finish()
}

fn print_summary(plant: &Plant) {
    let branches = plant.branches().count();
    let deepest = plant.stems().iter().map(|s| s.kind.depth()).max().unwrap_or(0);
    eprintln!(
        "  Stems: {} ({} branches, max depth {})",
        plant.stems().len(),
        branches,
        deepest
    );
    eprintln!("  Segments: {}", plant.segments().count());
    eprintln!(
        "  Flowers: {} ({} petals), leaves: {}",
        plant.flowers().count(),
        plant.petal_count(),
        plant.leaf_count()
    );
    eprintln!("  Colors: {:?}, main flower {}", plant.policy, plant.color);
}

/// Rasterize an SVG document with resvg. Returns the pixel size.
fn generate_png(svg: &str, png_path: &str, scale: f64) -> Result<(u32, u32), CliError> {
    use tiny_skia::Pixmap;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| CliError::Render(e.to_string()))?;

    let size = tree.size();
    let pixmap_width = (size.width() as f64 * scale).ceil() as u32;
    let pixmap_height = (size.height() as f64 * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height).ok_or_else(|| {
        CliError::Render(format!("could not create {}x{} pixmap", pixmap_width, pixmap_height))
    })?;

    // Fill with white background
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .map_err(|e| CliError::Render(format!("{}: {}", png_path, e)))?;
    Ok((pixmap_width, pixmap_height))
}

// ============================================================================
// JSON OUTPUT
// ============================================================================

/// A stem in JSON output.
#[derive(Serialize)]
struct JsonStem {
    kind: StemKind,
    depth: u32,
    segments: usize,
    headings: Vec<f64>,
    widths: Vec<f64>,
    end: Point,
}

/// A flower in JSON output, with its petals expanded.
#[derive(Serialize)]
struct JsonFlower {
    center: Point,
    color: Color,
    inner_radius: f64,
    outer_radius: f64,
    disc_radius: f64,
    petals: Vec<Petal>,
}

impl From<&FlowerHead> for JsonFlower {
    fn from(head: &FlowerHead) -> Self {
        Self {
            center: head.center,
            color: head.color,
            inner_radius: head.inner_radius,
            outer_radius: head.outer_radius,
            disc_radius: head.disc_radius(),
            petals: head.petals(),
        }
    }
}

/// Structure counts in JSON output.
#[derive(Serialize)]
struct JsonSummary {
    stems: usize,
    branches: usize,
    segments: usize,
    flowers: usize,
    petals: usize,
    leaves: usize,
}

/// Top-level JSON document.
#[derive(Serialize)]
struct JsonOutput<'a> {
    seed: u64,
    config: &'a SessionConfig,
    summary: JsonSummary,
    bounds: Bounds,
    stems: Vec<JsonStem>,
    flowers: Vec<JsonFlower>,
    plant: &'a Plant,
}

impl<'a> JsonOutput<'a> {
    fn new(plant: &'a Plant, config: &'a SessionConfig, seed: u64) -> Self {
        let stems = plant
            .stems()
            .iter()
            .map(|s| JsonStem {
                kind: s.kind,
                depth: s.kind.depth(),
                segments: s.segment_count(),
                headings: s.steps.iter().map(|st| st.heading).collect(),
                widths: s.steps.iter().map(|st| st.width).collect(),
                end: s.end.position,
            })
            .collect();

        Self {
            seed,
            config,
            summary: JsonSummary {
                stems: plant.stems().len(),
                branches: plant.branches().count(),
                segments: plant.segments().count(),
                flowers: plant.flowers().count(),
                petals: plant.petal_count(),
                leaves: plant.leaf_count(),
            },
            bounds: plant.bounds(),
            stems,
            flowers: plant.flowers().map(JsonFlower::from).collect(),
            plant,
        }
    }
}

/// Print usage information.
pub fn print_usage() {
    eprintln!("wildflower draw - Grow one plant and draw it");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    wildflower draw [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("    --json                 Write the plant structure as JSON instead of SVG");
    eprintln!("    --png <file>           Also render a PNG");
    eprintln!("    --png-scale <n>        PNG scale factor (default: 1.0)");
    eprintln!("    --crop                 Frame the plant instead of the whole canvas");
    eprintln!("    -q, --quiet            No progress output");
    print_session_options();
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    wildflower draw -o flower.svg --png flower.png");
    eprintln!("    wildflower draw --seed 42 --diverse-colors --crop > flower.svg");
    eprintln!("    wildflower draw --daily --json -o today.json");
}

/// Options shared by `draw` and `config`.
pub fn print_session_options() {
    eprintln!();
    eprintln!("SESSION OPTIONS:");
    eprintln!("    --seed <n>             Random seed for reproducibility");
    eprintln!("    --daily                Seed from today's date");
    eprintln!("    -c, --config <file>    YAML config overrides");
    eprintln!("    --width <w>            Canvas width (default: 600)");
    eprintln!("    --height <h>           Canvas height (default: 800)");
    eprintln!("    --shared-colors        Branch flowers reuse the plant color");
    eprintln!("    --diverse-colors       Branch flowers pick their own colors");
    eprintln!("    --leaf-chance <p>      Per-step leaf probability (default: 0)");
    eprintln!("    --branch-chance <p>    Per-step branch probability (default: rolled)");
}
