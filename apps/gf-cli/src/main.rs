use clap::{Parser, Subcommand};
use gf_app::{AppError, AppResult, ComponentSummary, project_service, registry, setup_service};
use gf_components::{FieldCategory, FieldLocation};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gf-cli")]
#[command(about = "GeoFEM CLI - configure and set up finite-element components", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List component families and their factories
    Families,
    /// Show the output fields a factory provides
    Fields {
        /// Component family (e.g., material)
        family: String,
        /// Factory name (e.g., maxwellplanestrain)
        factory: String,
    },
    /// List the components defined in a project
    Components {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Validate a project and configure every component
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Bring every component of a project to the active state
    Setup {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Print component summaries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read the mesh of a mesh reader component
    Mesh {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// ID of the mesh_io component
        component_id: String,
        /// Print the full mesh as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Families => cmd_families(),
        Commands::Fields { family, factory } => cmd_fields(&family, &factory),
        Commands::Components { project_path } => cmd_components(&project_path),
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Setup { project_path, json } => cmd_setup(&project_path, json),
        Commands::Mesh {
            project_path,
            component_id,
            json,
        } => cmd_mesh(&project_path, &component_id, json),
    }
}

fn cmd_families() -> AppResult<()> {
    let registry = registry::default_registry()?;
    for family in registry::list_families(&registry) {
        println!("{}:", family.family);
        for factory in family.factories {
            println!("  {:<20} {}", factory.name, factory.description);
        }
    }
    Ok(())
}

fn cmd_fields(family: &str, factory: &str) -> AppResult<()> {
    let registry = registry::default_registry()?;
    let fields = registry::available_fields(&registry, family, factory)?;
    if fields.is_empty() {
        println!("{}/{} provides no output fields", family, factory);
        return Ok(());
    }

    for location in [FieldLocation::Vertex, FieldLocation::Cell] {
        for category in [FieldCategory::Info, FieldCategory::Data] {
            let names = fields.get(location, category);
            if !names.is_empty() {
                println!("{} {}: {}", location, category, names.join(", "));
            }
        }
    }
    Ok(())
}

fn cmd_components(project_path: &Path) -> AppResult<()> {
    let loaded = project_service::load_project(project_path)?;
    let components = project_service::list_components(&loaded.project);

    if components.is_empty() {
        println!("No components found in project");
    } else {
        println!("Components in project:");
        for c in components {
            println!(
                "  {} - {}/{} ({} properties)",
                c.id, c.family, c.factory, c.property_count
            );
        }
    }
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let registry = registry::default_registry()?;
    let loaded = project_service::load_project(project_path)?;
    project_service::validate_project(&loaded, &registry)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_setup(project_path: &Path, json: bool) -> AppResult<()> {
    let registry = registry::default_registry()?;
    let loaded = project_service::load_project(project_path)?;
    let setup = setup_service::setup(&loaded, &registry)?;
    let summaries = setup.summaries();
    setup.destroy();

    if json {
        return print_json(&summaries);
    }

    println!("✓ {} components active", summaries.len());
    for s in &summaries {
        for line in summary_lines(s) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn summary_lines(s: &ComponentSummary) -> Vec<String> {
    let mut lines = vec![format!("  {} ({}/{})", s.id, s.family, s.factory)];
    lines.extend(
        s.properties
            .iter()
            .map(|(name, value)| format!("    {} = {}", name, value)),
    );
    lines.extend(
        s.facilities
            .iter()
            .map(|(name, factory)| format!("    {} = <{}>", name, factory)),
    );
    lines
}

fn cmd_mesh(project_path: &Path, component_id: &str, json: bool) -> AppResult<()> {
    let registry = registry::default_registry()?;
    let loaded = project_service::load_project(project_path)?;
    let (mesh, summary) = setup_service::read_mesh(&loaded, &registry, component_id)?;

    if json {
        return print_json(&mesh);
    }

    println!("Mesh from component: {}", summary.id);
    println!(
        "  Dimension: {} (space {}), {} corners per cell",
        summary.cell_dim, summary.space_dim, summary.corners
    );
    println!("  Vertices: {}", summary.vertices);
    println!("  Cells: {}", summary.cells);
    println!("  Material IDs: {:?}", summary.material_ids);
    for (name, count) in &summary.groups {
        println!("  Group {}: {} vertices", name, count);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| AppError::Output(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
