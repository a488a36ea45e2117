use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use windingroad::api::{ApiClient, DETAIL_SIZE, StaticMapClient};
use windingroad::catalog::{CourseSource, LocalCatalog};
use windingroad::config::FileConfig;
use windingroad::domain::{Course, CourseFilters, RatingRange, Recommendation};
use windingroad::geometry::{MarkerRole, RouteSummary, route_distance_km};

/// Browse curated driving courses and recommendation bundles
///
/// Examples:
///   # List hairpin courses in Gangwon with an average rating of 7 or more
///   windingroad courses --region Gangwon --style hairpin --min-rating 7
///
///   # Show a course with its waypoints, straight-line distance and map view
///   windingroad course 3
///
///   # Browse a local catalog instead of the API
///   windingroad --data ./data recommendations
///
///   # Download static map images for every course
///   NAVER_CLIENT_ID=... NAVER_CLIENT_SECRET=... windingroad map-images
#[derive(Parser, Debug)]
#[command(name = "windingroad")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches windingroad.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Course API base URL (overrides config and WINDINGROAD_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Read courses.json / recommendations.json from this directory instead of the API
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List courses, optionally filtered
    Courses(CoursesArgs),

    /// Show one course with its route
    Course {
        id: u32,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List recommendation bundles
    Recommendations {
        #[arg(long)]
        json: bool,
    },

    /// Show one recommendation bundle with its courses
    Recommendation {
        id: u32,
        #[arg(long)]
        json: bool,
    },

    /// Download thumbnail and detail static map images
    MapImages {
        /// Course ids (defaults to every course)
        ids: Vec<u32>,
        /// Output directory (defaults to image_dir from config)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Check that the course API is up
    Health,
}

#[derive(clap::Args, Debug)]
struct CoursesArgs {
    /// Region, "all" for every region
    #[arg(short = 'r', long, default_value = "")]
    region: String,

    /// Driving style, "all" for every style
    #[arg(short = 's', long, default_value = "")]
    style: String,

    /// Search name, tagline, characteristics and region
    #[arg(short = 'q', long, default_value = "")]
    search: String,

    /// Lowest average rating to keep (0-10)
    #[arg(long, default_value = "0")]
    min_rating: f64,

    /// Highest average rating to keep (0-10)
    #[arg(long, default_value = "10")]
    max_rating: f64,

    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match args.config {
        Some(ref path) => FileConfig::load_from(path)?,
        None => FileConfig::load(),
    }
    .with_process_env();

    if let Some(ref url) = args.api_url {
        config.api_url = url.clone();
    }
    if let Some(ref dir) = args.data {
        config.data_dir = Some(dir.clone());
    }

    tracing::debug!("Configuration: {:?}", redacted(&config));

    if let Command::Health = args.command {
        return run_health(&config);
    }

    let source = open_source(&config)?;

    match args.command {
        Command::Courses(ref opts) => run_courses(source.as_ref(), opts),
        Command::Course { id, json } => run_course(source.as_ref(), &config, id, json),
        Command::Recommendations { json } => run_recommendations(source.as_ref(), json),
        Command::Recommendation { id, json } => run_recommendation(source.as_ref(), id, json),
        Command::MapImages { ref ids, ref out } => {
            let out_dir = out.clone().unwrap_or_else(|| config.image_dir.clone());
            run_map_images(source.as_ref(), &config, ids, &out_dir)
        }
        Command::Health => unreachable!("handled above"),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn redacted(config: &FileConfig) -> FileConfig {
    let mut shown = config.clone();
    if !shown.static_map.client_secret.is_empty() {
        shown.static_map.client_secret = "***".to_string();
    }
    shown
}

fn open_source(config: &FileConfig) -> Result<Box<dyn CourseSource>> {
    match config.data_dir {
        Some(ref dir) => {
            let catalog = LocalCatalog::load(dir)
                .with_context(|| format!("Failed to load local catalog from {}", dir.display()))?;
            Ok(Box::new(catalog))
        }
        None => {
            let client = ApiClient::from_config(config).context("Failed to create API client")?;
            Ok(Box::new(client))
        }
    }
}

fn run_health(config: &FileConfig) -> Result<()> {
    if config.data_dir.is_some() {
        bail!("health checks the course API and cannot be used with --data");
    }
    let client = ApiClient::from_config(config).context("Failed to create API client")?;

    let spinner = create_spinner(&format!("Checking {}...", client.base_url()));
    let start = Instant::now();
    let health = client.health().context("Health check failed")?;
    spinner.finish_with_message(format!(
        "API status: {} [{:.1}s]",
        health.status,
        start.elapsed().as_secs_f32()
    ));
    Ok(())
}

fn run_courses(source: &dyn CourseSource, opts: &CoursesArgs) -> Result<()> {
    for value in [opts.min_rating, opts.max_rating] {
        if !(0.0..=10.0).contains(&value) {
            bail!("Ratings must be between 0 and 10, got {}", value);
        }
    }
    if opts.min_rating > opts.max_rating {
        bail!(
            "--min-rating ({}) is greater than --max-rating ({})",
            opts.min_rating,
            opts.max_rating
        );
    }

    let filters = CourseFilters {
        region: opts.region.clone(),
        style: opts.style.clone(),
        search: opts.search.clone(),
    };

    let spinner = create_spinner("Fetching courses...");
    let start = Instant::now();
    let mut courses = source
        .courses(&filters)
        .context("Failed to fetch courses")?;
    let fetched = courses.len();

    let rating = RatingRange::new(opts.min_rating, opts.max_rating);
    rating.retain(&mut courses);
    spinner.finish_with_message(format!(
        "Fetched {} courses, {} after rating filter [{:.1}s]",
        fetched,
        courses.len(),
        start.elapsed().as_secs_f32()
    ));

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&courses)?);
        return Ok(());
    }

    if courses.is_empty() {
        if filters.is_empty() && rating.is_unbounded() {
            println!("The catalog has no courses.");
        } else {
            println!("No courses match the given filters.");
        }
        return Ok(());
    }

    println!();
    for course in &courses {
        print_course_line(course);
    }
    Ok(())
}

fn run_course(source: &dyn CourseSource, config: &FileConfig, id: u32, json: bool) -> Result<()> {
    let course = source
        .course(id)
        .with_context(|| format!("Failed to fetch course {}", id))?;
    let route = RouteSummary::of(&course.nav);

    let map_client = StaticMapClient::new(
        config.static_map.clone(),
        Duration::from_secs(config.timeout_secs),
    )
    .context("Failed to create static map client")?;
    let (w, h) = DETAIL_SIZE;
    let map_url = map_client.build_url(&course, w, h);

    if json {
        let value = serde_json::json!({
            "course": course,
            "route": route,
            "staticMapUrl": map_url,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_course_detail(&course, &route, map_url.as_deref());
    Ok(())
}

fn run_recommendations(source: &dyn CourseSource, json: bool) -> Result<()> {
    let spinner = create_spinner("Fetching recommendations...");
    let start = Instant::now();
    let recs = source
        .recommendations()
        .context("Failed to fetch recommendations")?;
    spinner.finish_with_message(format!(
        "Fetched {} recommendations [{:.1}s]",
        recs.len(),
        start.elapsed().as_secs_f32()
    ));

    if json {
        println!("{}", serde_json::to_string_pretty(&recs)?);
        return Ok(());
    }

    for rec in &recs {
        println!();
        print_recommendation(rec);
    }
    Ok(())
}

fn run_recommendation(source: &dyn CourseSource, id: u32, json: bool) -> Result<()> {
    let rec = source
        .recommendation(id)
        .with_context(|| format!("Failed to fetch recommendation {}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
        return Ok(());
    }

    print_recommendation(&rec);
    Ok(())
}

fn run_map_images(
    source: &dyn CourseSource,
    config: &FileConfig,
    ids: &[u32],
    out_dir: &std::path::Path,
) -> Result<()> {
    if !config.static_map.has_credentials() {
        bail!("Static map credentials missing: set NAVER_CLIENT_ID and NAVER_CLIENT_SECRET");
    }

    let courses: Vec<Course> = if ids.is_empty() {
        source
            .courses(&CourseFilters::default())
            .context("Failed to fetch courses")?
    } else {
        ids.iter()
            .map(|&id| {
                source
                    .course(id)
                    .with_context(|| format!("Failed to fetch course {}", id))
            })
            .collect::<Result<_>>()?
    };

    let client = StaticMapClient::new(
        config.static_map.clone(),
        Duration::from_secs(config.timeout_secs),
    )
    .context("Failed to create static map client")?;

    let total_start = Instant::now();
    let mut failed = 0;

    for course in &courses {
        let spinner = create_spinner(&format!("Rendering course {} ({})...", course.id, course.name));
        let start = Instant::now();
        match client.generate_for_course(course, out_dir) {
            Ok(images) => spinner.finish_with_message(format!(
                "Course {}: {} and {} [{:.1}s]",
                course.id,
                images.thumbnail.display(),
                images.detail.display(),
                start.elapsed().as_secs_f32()
            )),
            Err(e) => {
                failed += 1;
                spinner.finish_with_message(format!("Course {}: failed", course.id));
                tracing::warn!("Map images for course {} failed: {:#}", course.id, anyhow::Error::new(e));
            }
        }
    }

    println!();
    println!(
        "Done! {} of {} courses in {:.1}s",
        courses.len() - failed,
        courses.len(),
        total_start.elapsed().as_secs_f32()
    );

    if failed > 0 {
        bail!("{} course(s) failed to render", failed);
    }
    Ok(())
}

fn print_course_line(course: &Course) {
    let distance = route_distance_km(&course.nav)
        .map(|km| format!("{:.1} km", km))
        .unwrap_or_else(|| "-".to_string());

    println!(
        "{:>4}  {}  [{}]  {}  avg {:.1}  {}",
        course.id,
        course.name,
        course.region,
        course.styles.join(", "),
        course.ratings.average(),
        distance
    );
    if !course.tagline.is_empty() {
        println!("      {}", course.tagline);
    }
}

fn print_course_detail(course: &Course, route: &RouteSummary, map_url: Option<&str>) {
    println!("{} (#{})", course.name, course.id);
    println!("{}", "=".repeat(course.name.chars().count() + 4 + course.id.to_string().len()));
    println!();
    println!("Region:          {}", course.region);
    if !course.tagline.is_empty() {
        println!("Tagline:         {}", course.tagline);
    }
    if !course.characteristics.is_empty() {
        println!("Characteristics: {}", course.characteristics);
    }
    println!("Styles:          {}", course.styles.join(", "));

    let r = &course.ratings;
    println!(
        "Ratings:         tech {} / speed {} / scenery {} / road {} / access {} (avg {:.1})",
        r.tech,
        r.speed,
        r.scenery,
        r.road,
        r.access,
        r.average()
    );
    if !course.notes.is_empty() {
        println!("Notes:           {}", course.notes);
    }

    println!();
    println!("Route");
    println!("-----");
    if route.is_empty() {
        println!("No route data.");
        return;
    }

    for (i, (waypoint, marker)) in course.nav.iter().zip(&route.markers).enumerate() {
        println!(
            "  {:>2}. {:<5} {} ({})  {:.6}, {:.6}",
            i + 1,
            role_label(marker.role),
            waypoint.label,
            waypoint.kind,
            waypoint.latitude(),
            waypoint.longitude()
        );
    }

    println!();
    if let Some(km) = route.total_distance_km {
        println!("Straight-line distance: {:.1} km", km);
    }
    if let Some(view) = route.view {
        println!(
            "Map view: center ({:.6}, {:.6}), zoom {}",
            view.center.latitude, view.center.longitude, view.zoom_level
        );
    }
    if let Some(url) = course.naver_map_url.as_deref().filter(|u| !u.is_empty()) {
        println!("Directions: {}", url);
    }
    if let Some(url) = map_url {
        println!("Static map: {}", url);
    }
}

fn role_label(role: MarkerRole) -> &'static str {
    match role {
        MarkerRole::Start => "START",
        MarkerRole::Via => "via",
        MarkerRole::End => "END",
    }
}

fn print_recommendation(rec: &Recommendation) {
    println!("{} (#{})", rec.title, rec.id);
    if !rec.description.is_empty() {
        println!("{}", rec.description);
    }
    println!();
    if rec.courses.is_empty() {
        println!("  (no courses)");
    }
    for course in &rec.courses {
        print_course_line(course);
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
