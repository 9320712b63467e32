use chefora::command::{Command as LineCommand, HELP};
use chefora::render::render_lookup;
use chefora::{Browser, BrowserConfig, MealDbClient, MealSource, Tab};
use clap::{Parser, Subcommand};
use log::debug;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "chefora", version, about = "Browse TheMealDB recipes from the terminal")]
struct Cli {
    /// Frame width in columns (overrides config)
    #[arg(long, global = true)]
    width: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find recipes that use an ingredient
    Search { term: String },
    /// Browse recipes by category and area
    Browse {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        area: Option<String>,
        /// Filter the category chips
        #[arg(long)]
        filter: Option<String>,
        /// Filter the area chips
        #[arg(long)]
        area_filter: Option<String>,
        /// Show every chip instead of a single row
        #[arg(long)]
        expanded: bool,
    },
    /// Show a random recipe
    Special,
    /// Show a recipe in full
    Show { id: String },
    /// Line-driven session
    Interactive,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = BrowserConfig::load()?;
    let width = cli.width.unwrap_or(config.width);
    debug!("Using recipe service at {}", config.base_url);

    let client = Arc::new(MealDbClient::new(&config)?);

    match cli.command {
        Commands::Search { term } => {
            let mut browser = Browser::new(client, &config);
            browser.edit(|s| {
                s.set_tab(Tab::Search);
                s.set_term(term);
            });
            browser.wait_for_pending().await;
            print!("{}", browser.frame(width));
        }
        Commands::Browse {
            category,
            area,
            filter,
            area_filter,
            expanded,
        } => {
            let mut browser = Browser::new(client, &config);
            browser.edit(|s| {
                if let Some(category) = category {
                    s.select_category(category);
                }
                if let Some(area) = area {
                    s.select_area(area);
                }
                s.set_category_query(filter.unwrap_or_default());
                s.set_area_query(area_filter.unwrap_or_default());
                if expanded {
                    s.toggle_category_expanded();
                    s.toggle_area_expanded();
                }
            });
            browser.wait_for_pending().await;
            print!("{}", browser.frame(width));
        }
        Commands::Special => {
            let mut browser = Browser::new(client, &config);
            browser.set_tab(Tab::Special);
            browser.wait_for_pending().await;
            print!("{}", browser.frame(width));
        }
        Commands::Show { id } => {
            let result = client.try_lookup(&id).await;
            if let Err(e) = &result {
                debug!("Lookup of {} failed: {:?}", id, e);
            }
            for line in render_lookup(&id, &result, width) {
                println!("{}", line);
            }
        }
        Commands::Interactive => interactive(client, &config, width).await?,
    }

    Ok(())
}

async fn interactive(
    client: Arc<MealDbClient>,
    config: &BrowserConfig,
    width: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut browser = Browser::new(client, config);
    browser.sync();
    browser.wait_for_pending().await;
    print!("{}", browser.frame(width));
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<LineCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        match command {
            LineCommand::Quit => break,
            LineCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            other => other.apply(&mut browser),
        }

        browser.wait_for_pending().await;
        print!("{}", browser.frame(width));

        // Play the drawer animation out, one frame per phase
        while let Some(remaining) = browser.next_transition() {
            tokio::time::sleep(remaining).await;
            if browser.tick().is_some() {
                print!("{}", browser.frame(width));
            }
        }
    }

    Ok(())
}
