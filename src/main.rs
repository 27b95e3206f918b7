use clap::{Parser, Subcommand};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use recipe_box::{recipe_from_html_with_config, Catalog, Recipe, Settings};

#[derive(Parser)]
#[command(name = "recipe-box")]
#[command(author, version, about = "Parse, check and format plain-text recipes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print recipes in canonical form
    Fmt {
        /// Recipe files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Only report files that are not in canonical form
        #[arg(long, conflicts_with = "write")]
        check: bool,
        /// Rewrite files in place
        #[arg(long)]
        write: bool,
    },
    /// Validate recipe files
    Check {
        /// Recipe files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show a parsed recipe
    Show {
        /// Recipe file
        file: PathBuf,
        /// Print the parsed structure as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import the recipe embedded in a saved web page
    Import {
        /// HTML file
        file: PathBuf,
    },
    /// List the recipe folder by category
    List {
        /// Recipe folder (defaults to the configured library folder)
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Only show titles containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn read_recipe(path: &Path) -> Result<(String, Recipe), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let recipe = Recipe::parse(&text).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok((text, recipe))
}

fn fmt(files: &[PathBuf], check: bool, write: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let mut clean = true;
    for path in files {
        let (text, recipe) = read_recipe(path)?;
        let canonical = recipe.serialize();

        if check {
            if text != canonical {
                println!("{}", path.display());
                clean = false;
            }
        } else if write {
            if text != canonical {
                debug!("Rewriting {}", path.display());
                fs::write(path, &canonical)?;
            }
        } else {
            print!("{canonical}");
        }
    }
    Ok(clean)
}

fn check(files: &[PathBuf]) -> bool {
    let mut ok = true;
    for path in files {
        match read_recipe(path) {
            Ok((_, recipe)) => println!("{}: ok ({})", path.display(), recipe.title),
            Err(e) => {
                eprintln!("{e}");
                ok = false;
            }
        }
    }
    ok
}

fn show(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_, recipe) = read_recipe(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
        return Ok(());
    }

    println!("{}", recipe.title);
    println!("  category: {}", recipe.category());
    for (key, value) in [
        ("yields", recipe.yields()),
        ("cuisine", recipe.cuisine()),
        ("source", recipe.source()),
    ] {
        if let Some(value) = value {
            println!("  {key}: {value}");
        }
    }
    if let Some(minutes) = recipe.prep_time() {
        println!("  prep time: {minutes} min");
    }
    if let Some(minutes) = recipe.cook_time() {
        println!("  cook time: {minutes} min");
    }
    for component in &recipe.components {
        if let Some(name) = &component.name {
            println!("  [{name}]");
        }
        for (index, step) in component.steps.iter().enumerate() {
            println!(
                "  {}. {} ({} ingredients)",
                index + 1,
                step.text,
                step.ingredients().len()
            );
        }
    }
    Ok(())
}

fn load_settings() -> Result<Settings, Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    debug!("{:#?}", settings);
    Ok(settings)
}

fn import(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings()?;
    let html = fs::read_to_string(path)?;
    let recipe = recipe_from_html_with_config(&html, &settings.import)?;
    print!("{recipe}");
    Ok(())
}

fn list(dir: Option<PathBuf>, filter: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings()?;
    let dir = dir.unwrap_or_else(|| settings.library.dir.clone());
    let catalog = Catalog::load(&dir, &settings.library.extension)?;
    let groups = match filter.as_deref() {
        Some(text) => catalog.filter(text),
        None => catalog.groups(),
    };

    for group in groups {
        println!("{}", group.category);
        for recipe in group.recipes {
            let marker = if recipe.favorite().is_some() { "*" } else { " " };
            let draft = if recipe.draft().is_some() { " (draft)" } else { "" };
            println!(" {marker} {}{draft}", recipe.title);
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Fmt { files, check, write } => fmt(&files, check, write),
        Commands::Check { files } => Ok(check(&files)),
        Commands::Show { file, json } => show(&file, json).map(|_| true),
        Commands::Import { file } => import(&file).map(|_| true),
        Commands::List { dir, filter } => list(dir, filter).map(|_| true),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
