use clap::{Parser, Subcommand};
use log::{debug, error};
use std::path::PathBuf;
use std::process::ExitCode;

use recipe_archive::browse::{
    self, SortMode, TagFilter, RELATED_RECIPE_LIMIT, SUGGESTED_TAG_LIMIT,
};
use recipe_archive::config::load_config;
use recipe_archive::export::{full_recipe_text, shopping_list_text};
use recipe_archive::ingredients::{format_measurement, ServingsScale};
use recipe_archive::method::{extract_sections, MethodSection};
use recipe_archive::{Recipe, RecipeRepository, RecipeSummary};

#[derive(Parser, Debug)]
#[command(name = "recipe-archive", author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, env = "RECIPES_CONFIG", default_value = "recipes")]
    config: String,

    /// Directory of recipe markdown files (overrides the configuration)
    #[arg(short, long)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List recipes, newest first
    List {
        /// Only recipes carrying every given tag
        #[arg(short, long)]
        tag: Vec<String>,

        /// Search title, description, tags and ingredients
        #[arg(short, long, default_value = "")]
        query: String,

        /// Sort order: date or time
        #[arg(short, long, default_value = "date")]
        sort: SortMode,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List every tag
    Tags {
        /// Rank tags by how many recipes use them
        #[arg(long)]
        counts: bool,

        /// Only tags containing this text (implies --counts)
        #[arg(short, long)]
        search: Option<String>,

        /// Rank within recipes carrying every given tag (implies --counts)
        #[arg(short, long)]
        tag: Vec<String>,

        #[arg(short, long, default_value_t = SUGGESTED_TAG_LIMIT)]
        limit: usize,
    },

    /// Show one recipe with ingredients scaled to a servings count
    Show {
        slug: String,

        #[arg(short, long)]
        servings: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a shopping list, or the full recipe as plain text
    Export {
        slug: String,

        #[arg(short, long)]
        servings: Option<u32>,

        /// Export the whole recipe instead of the shopping list
        #[arg(long)]
        full: bool,
    },

    /// Load every recipe and report the first invalid file
    Check,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    if let Some(dir) = cli.content_dir {
        config.content_dir = dir;
    }

    let repo = RecipeRepository::from_config(&config);
    debug!("Using content directory {}", repo.content_dir().display());

    match cli.command {
        Command::List {
            tag,
            query,
            sort,
            json,
        } => {
            let summaries = repo.list_summaries()?;
            let filter = if tag.is_empty() {
                TagFilter::All
            } else {
                TagFilter::AllOf(tag)
            };
            let mut listed = browse::filter(&summaries, &query, &filter);
            browse::sort(&mut listed, sort);

            if json {
                println!("{}", serde_json::to_string_pretty(&listed)?);
            } else {
                for summary in listed {
                    println!(
                        "{}  {:<28} {:>4}m  {}",
                        summary.date,
                        summary.slug,
                        summary.total_minutes,
                        summary.tags.join(", ")
                    );
                }
            }
        }

        Command::Tags {
            counts,
            search,
            tag,
            limit,
        } => {
            if counts || search.is_some() || !tag.is_empty() {
                let summaries = repo.list_summaries()?;
                let search = search.unwrap_or_default();
                for entry in browse::suggest_tags(&summaries, &tag, &search, limit) {
                    println!("{} ({})", entry.tag, entry.count);
                }
            } else {
                for tag in repo.list_tags()? {
                    println!("{tag}");
                }
            }
        }

        Command::Show {
            slug,
            servings,
            json,
        } => {
            let Some(recipe) = repo.load_by_slug(&slug) else {
                return Ok(not_found(&slug));
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                print_recipe(&recipe, servings);
                print_related(&repo.related_summaries(&recipe, RELATED_RECIPE_LIMIT)?);
            }
        }

        Command::Export {
            slug,
            servings,
            full,
        } => {
            let Some(recipe) = repo.load_by_slug(&slug) else {
                return Ok(not_found(&slug));
            };
            let scale = servings_scale(&recipe, servings);
            let text = if full {
                full_recipe_text(&recipe, scale.servings())
            } else {
                shopping_list_text(&recipe.title, &recipe.ingredients, scale.multiplier())
            };
            match text {
                Some(text) => println!("{text}"),
                None => {
                    eprintln!("No ingredients to export.");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Command::Check => match repo.load_all() {
            Ok(recipes) => println!("{} recipes OK", recipes.len()),
            Err(e) => {
                error!("{}", e);
                eprintln!("{e}");
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn not_found(slug: &str) -> ExitCode {
    eprintln!("Recipe '{slug}' not found");
    ExitCode::FAILURE
}

fn servings_scale(recipe: &Recipe, servings: Option<u32>) -> ServingsScale {
    let scale = ServingsScale::new(recipe.servings);
    match servings {
        Some(servings) => scale.with_servings(servings),
        None => scale,
    }
}

fn print_recipe(recipe: &Recipe, servings: Option<u32>) {
    let scale = servings_scale(recipe, servings);

    println!("{}", recipe.title);
    println!("{}", recipe.description);
    println!(
        "Servings: {}  Prep: {}m  Cook: {}m  Total: {}m",
        scale.servings(),
        recipe.prep_minutes,
        recipe.cook_minutes,
        recipe.total_minutes
    );
    if !recipe.tags.is_empty() {
        println!("Tags: {}", recipe.tags.join(", "));
    }

    println!("\nIngredients");
    for ingredient in &recipe.ingredients {
        match format_measurement(ingredient, scale.multiplier()).display() {
            Some(measurement) => println!("  {:<32} {}", ingredient.name, measurement),
            None => println!("  {}", ingredient.name),
        }
    }

    let sections = extract_sections(&recipe.body);
    print_section("Prep // Mise en Place", &sections.prep, 1);
    print_section(
        "Execution // Active Cooking",
        &sections.execution,
        sections.prep.steps.len() + 1,
    );
}

fn print_section(title: &str, section: &MethodSection, first_step: usize) {
    if section.is_empty() {
        return;
    }

    println!("\n{title}");
    for (offset, step) in section.steps.iter().enumerate() {
        println!("  {}. {}", first_step + offset, step);
    }
    for paragraph in &section.paragraphs {
        println!("  {paragraph}");
    }
    for image in &section.images {
        println!("  [{}] {}", image.alt, image.src);
    }
    if !section.notes.is_empty() {
        println!("  Notes");
        for note in &section.notes {
            println!("  - {note}");
        }
    }
}

fn print_related(related: &[RecipeSummary]) {
    if related.is_empty() {
        return;
    }

    println!("\nRelated");
    for summary in related {
        println!("  {:<28} {}", summary.slug, summary.title);
    }
}
