mod render;

use anyhow::Context;
use api_shared::{
    facet_rows, AnalysisRes, DiseaseFacetsRes, DiseaseListRes, DiseaseRes, RemedyFacetsRes,
    RemedyListRes, RemedyRes,
};
use clap::{Parser, Subcommand};
use lung_catalog::constants::CATALOG_DIR_ENV;
use lung_catalog::{
    Catalog, CatalogConfig, Category, DiseaseQuery, Effectiveness, Filter, RemedyQuery, Severity,
};
use lung_inference::{
    analyse_blocking, AnalysisReport, InferenceConfig, XrayImage, SEED_ENV, STEP_DELAY_ENV,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lung")]
#[command(about = "Browse the lung disease and natural remedy catalog")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and filter diseases
    Diseases {
        /// Case-insensitive text matched against name and description
        #[arg(long, default_value = "")]
        term: String,
        /// all, healthy, warning or critical
        #[arg(long)]
        severity: Option<String>,
    },
    /// Show one disease
    Disease {
        /// Disease id, e.g. tuberculosis
        id: String,
    },
    /// Search and filter remedies
    Remedies {
        /// Case-insensitive text matched against name and benefits
        #[arg(long, default_value = "")]
        term: String,
        /// all, herbs, essential-oils, lifestyle, diet or breathing
        #[arg(long)]
        category: Option<String>,
        /// all, high, medium or low
        #[arg(long)]
        effectiveness: Option<String>,
    },
    /// Show one remedy
    Remedy {
        /// Remedy id
        id: String,
    },
    /// Count records per filter value
    Facets,
    /// Run the placeholder X-ray analysis (random canned result, not a diagnosis)
    Analyse {
        /// Path to a chest X-ray image
        image: PathBuf,
        /// Write the text report into this directory
        #[arg(long)]
        report_dir: Option<PathBuf>,
        /// Seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,
        /// Delay per progress step in milliseconds
        #[arg(long)]
        step_delay_ms: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lung_catalog=warn".parse()?)
                .add_directive("lung_inference=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'lung --help' for commands");
        return Ok(());
    };

    let catalog_cfg = CatalogConfig::from_env_value(std::env::var(CATALOG_DIR_ENV).ok())?;
    let catalog = Catalog::load(&catalog_cfg)?;

    match command {
        Commands::Diseases { term, severity } => {
            let severity = Filter::<Severity>::parse_optional(severity.as_deref())?;
            let query = DiseaseQuery::new(term).with_severity(severity);
            let matches = catalog.query_diseases(&query);
            let res = DiseaseListRes::new(&query, &matches, catalog.diseases().len());
            emit(cli.json, &res, render::disease_list)?;
        }
        Commands::Disease { id } => {
            let disease = catalog
                .disease(&id)
                .with_context(|| format!("no disease with id {id:?}"))?;
            emit(cli.json, &DiseaseRes::from(disease), render::disease)?;
        }
        Commands::Remedies {
            term,
            category,
            effectiveness,
        } => {
            let query = RemedyQuery::new(term)
                .with_category(Filter::<Category>::parse_optional(category.as_deref())?)
                .with_effectiveness(Filter::<Effectiveness>::parse_optional(
                    effectiveness.as_deref(),
                )?);
            let matches = catalog.query_remedies(&query);
            let res = RemedyListRes::new(&query, &matches, catalog.remedies().len());
            emit(cli.json, &res, render::remedy_list)?;
        }
        Commands::Remedy { id } => {
            let remedy = catalog
                .remedy(&id)
                .with_context(|| format!("no remedy with id {id:?}"))?;
            emit(cli.json, &RemedyRes::from(remedy), render::remedy)?;
        }
        Commands::Facets => {
            let diseases = DiseaseFacetsRes {
                severity: facet_rows(&catalog.severity_facets()),
            };
            let remedies = RemedyFacetsRes {
                category: facet_rows(&catalog.category_facets()),
                effectiveness: facet_rows(&catalog.effectiveness_facets()),
            };
            if cli.json {
                let both = serde_json::json!({ "diseases": diseases, "remedies": remedies });
                println!("{}", serde_json::to_string_pretty(&both)?);
            } else {
                print!("{}", render::facet("Severity", &diseases.severity));
                print!("{}", render::facet("Category", &remedies.category));
                print!("{}", render::facet("Effectiveness", &remedies.effectiveness));
            }
        }
        Commands::Analyse {
            image,
            report_dir,
            seed,
            step_delay_ms,
        } => {
            let inference = InferenceConfig::from_env_values(
                step_delay_ms
                    .map(|ms| ms.to_string())
                    .or_else(|| std::env::var(STEP_DELAY_ENV).ok()),
                seed.map(|s| s.to_string())
                    .or_else(|| std::env::var(SEED_ENV).ok()),
            )?;

            let bytes = std::fs::read(&image)
                .with_context(|| format!("failed to read image {}", image.display()))?;
            let file_name = image
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let xray = XrayImage::from_bytes(file_name, bytes)?;

            let stub = inference.build_stub();
            let show_progress = !cli.json;
            let prediction = analyse_blocking(&stub, &xray, inference.step_delay(), |step| {
                if show_progress {
                    eprintln!("[{:>3}%] {}", step.progress, step.message);
                }
            })?;
            let report = AnalysisReport::new(xray.file_name(), prediction);

            if cli.json {
                let res = AnalysisRes::new(&xray, &lung_inference::ANALYSIS_STEPS, &report);
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                print!("{}", report.render());
            }

            if let Some(dir) = report_dir {
                let path = report.write_to_dir(&dir)?;
                eprintln!("Report written to {}", path.display());
            }
        }
    }

    Ok(())
}

fn emit<T: serde::Serialize>(json: bool, value: &T, text: fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}
