use clap::Parser;
use distforge::engine::BundlerCommand;
use distforge::options::RawOptions;
use distforge::{config, driver, output};
use std::path::PathBuf;

/// Release builds report the crate version; anything else reports the commit
/// it was built from.
fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "distforge")]
#[command(about = "Build the chart library's distribution bundles")]
#[command(long_about = "\
Build the chart library's distribution bundles

With no options, runs a full distribution build: dist/ is wiped, all 16
shipping artifacts are built (12 chart bundle variants plus the geomap and
datatool extensions, each plain and minified), and src/ is staged to lib/
for publishing. Supplying any option narrows the run to a single bundle.

Expected project layout:

  project/
  ├── build.toml                  # Driver config (optional, defaults shown by --gen-config)
  ├── build/bundle.js             # Bundler wrapper invoked once per job
  ├── src/
  │   ├── index.js                # Full bundle entry
  │   ├── index.simple.js         # Simple flavor entry
  │   └── index.common.js         # Common flavor entry
  ├── lang/
  │   └── en.js                   # Language resource, one per --lang code
  ├── extension/
  │   ├── geomap/index.js
  │   └── datatool/index.js
  ├── dist/                       # Output bundles (owned by distforge)
  └── lib/                        # Publish staging (owned by distforge)

A full build emits, in order:

  chart.js  chart.simple.js  chart.common.js        (plus .min variants)
  chart-en.js  chart-en.simple.js  chart-en.common.js  (plus .min variants)
  extension/geomap.js  extension/datatool.js        (plus .min variants)

Run 'distforge --gen-config' to print a documented build.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Watch source modifications and auto-compile the single described
    /// bundle (e.g. `dist/chart.js`). Never wipes dist, never stages.
    #[arg(short = 'w', long)]
    watch: bool,

    /// Only build the variant for this language code. A lang/<CODE>.js
    /// resource file is required, e.g. `--lang en` needs lang/en.js.
    #[arg(long, value_name = "CODE")]
    lang: Option<String>,

    /// Compress the output file.
    #[arg(long)]
    min: bool,

    /// Bundle flavor: "simple", "common" or "" (default, the full bundle).
    #[arg(long = "type", value_name = "NAME")]
    kind: Option<String>,

    /// Project root containing src/, lang/ and build.toml.
    #[arg(long, default_value = ".", value_name = "DIR")]
    project_dir: PathBuf,

    /// Print the resolved job list as JSON and exit without building.
    #[arg(long)]
    dry_run: bool,

    /// Print a stock build.toml with all options documented, then exit.
    #[arg(long)]
    gen_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let raw = RawOptions {
        watch: cli.watch,
        lang: cli.lang,
        min: cli.min,
        kind: cli.kind,
    };
    let project_config = config::load(&cli.project_dir)?;
    let plan = driver::plan(&raw);

    if cli.dry_run {
        let jobs = resolve_jobs(&plan, &project_config)?;
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }

    init_worker_pool(&project_config.build);
    let engine = BundlerCommand::new(
        project_config.bundler.command.clone(),
        project_config.bundler.args.clone(),
        cli.project_dir.clone(),
    );

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            println!("{}", output::format_build_event(&event));
        }
    });

    let summary = driver::run(plan, &project_config, &cli.project_dir, &engine, Some(tx))?;

    printer.join().unwrap();
    output::print_plan(&summary.jobs);
    output::print_summary(&summary, &project_config.staging_dir);
    Ok(())
}

/// Realize the jobs a plan would build, without touching the filesystem.
fn resolve_jobs(
    plan: &driver::RunPlan,
    config: &config::ProjectConfig,
) -> Result<Vec<distforge::job::JobDescriptor>, distforge::job::JobError> {
    match plan {
        driver::RunPlan::Watch(opts) | driver::RunPlan::Single(opts) => {
            Ok(vec![distforge::job::from_options(opts, config)?])
        }
        driver::RunPlan::All => Ok(distforge::matrix::full_matrix()
            .iter()
            .map(|spec| distforge::job::from_spec(spec, config))
            .collect()),
    }
}

/// Initialize the rayon pool based on build config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_worker_pool(build: &config::BuildConfig) {
    let workers = config::effective_workers(build);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
