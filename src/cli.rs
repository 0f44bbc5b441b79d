use crate::{
    app::{App, Row},
    category::{Category, ALL},
    gametime,
    sorting::{LocationSelection, SortMode},
    state::MAX_STARS,
    ui,
};
use anyhow::{bail, Result};
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "json" => Some(OutputFormat::Json),
            "text" => Some(OutputFormat::Text),
            _ => None,
        }
    }
}

enum CliAction {
    Ui,
    Command {
        command: CliCommand,
        format: OutputFormat,
    },
}

enum CliCommand {
    List(ListOptions),
    Clock,
    Stats,
    Rate {
        category: Category,
        name: String,
        stars: u8,
    },
    Help,
    Version,
}

struct ListOptions {
    category: Option<Category>,
    available_only: bool,
    location: Option<String>,
    sort: Option<SortMode>,
}

fn parse_sort_mode(value: &str) -> Option<SortMode> {
    match value {
        "default" => Some(SortMode::Default),
        "level" => Some(SortMode::Level),
        "location" => Some(SortMode::Location),
        "name" => Some(SortMode::Name),
        _ => None,
    }
}

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = parse_args(&args)?;
    match action {
        CliAction::Ui => {
            let mut app = App::initialize()?;
            ui::run(&mut app)
        }
        CliAction::Command { command, format } => match command {
            CliCommand::Help => {
                print_help();
                Ok(())
            }
            CliCommand::Version => {
                println!("Heartsmith v{}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            _ => {
                let mut app = App::initialize()?;
                run_command(&mut app, command, format)
            }
        },
    }
}

fn parse_args(args: &[String]) -> Result<CliAction> {
    if args.is_empty() {
        return Ok(CliAction::Ui);
    }

    let mut format = OutputFormat::Text;
    let mut positional: Vec<String> = Vec::new();
    let mut category: Option<Category> = None;
    let mut available_only = false;
    let mut location: Option<String> = None;
    let mut sort: Option<SortMode> = None;

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--format" | "-f" => {
                let Some(value) = iter.next() else {
                    bail!("--format requires a value (text or json)");
                };
                let Some(parsed) = OutputFormat::parse(value) else {
                    bail!("unknown format {value:?} (expected text or json)");
                };
                format = parsed;
            }
            "--category" | "-c" => {
                let Some(value) = iter.next() else {
                    bail!("--category requires a value (fish, bugs or birds)");
                };
                let Some(parsed) = Category::parse(value) else {
                    bail!("unknown category {value:?} (expected fish, bugs or birds)");
                };
                category = Some(parsed);
            }
            "--available" | "-a" => available_only = true,
            "--sort" | "-s" => {
                let Some(value) = iter.next() else {
                    bail!("--sort requires a value (default, level, location or name)");
                };
                let Some(parsed) = parse_sort_mode(value) else {
                    bail!("unknown sort mode {value:?}");
                };
                sort = Some(parsed);
            }
            "--location" | "-l" => {
                let Some(value) = iter.next() else {
                    bail!("--location requires a value");
                };
                location = Some(value.clone());
            }
            "--help" | "-h" => {
                return Ok(CliAction::Command {
                    command: CliCommand::Help,
                    format,
                });
            }
            "--version" | "-V" => {
                return Ok(CliAction::Command {
                    command: CliCommand::Version,
                    format,
                });
            }
            other if other.starts_with('-') => bail!("unknown option {other:?}"),
            other => positional.push(other.to_string()),
        }
    }

    let Some(command) = positional.first() else {
        return Ok(CliAction::Ui);
    };

    let command = match command.as_str() {
        "list" => CliCommand::List(ListOptions {
            category,
            available_only,
            location,
            sort,
        }),
        "clock" => CliCommand::Clock,
        "stats" => CliCommand::Stats,
        "rate" => {
            if positional.len() != 4 {
                bail!("usage: heartsmith rate <category> <name> <stars>");
            }
            let Some(category) = Category::parse(&positional[1]) else {
                bail!("unknown category {:?}", positional[1]);
            };
            let stars: u8 = match positional[3].parse() {
                Ok(value) if value <= MAX_STARS => value,
                _ => bail!("stars must be an integer from 0 to {MAX_STARS}"),
            };
            CliCommand::Rate {
                category,
                name: positional[2].clone(),
                stars,
            }
        }
        "help" => CliCommand::Help,
        "version" => CliCommand::Version,
        other => bail!("unknown command {other:?} (try help)"),
    };

    Ok(CliAction::Command { command, format })
}

fn run_command(app: &mut App, command: CliCommand, format: OutputFormat) -> Result<()> {
    match command {
        CliCommand::List(options) => run_list(app, options, format),
        CliCommand::Clock => run_clock(app, format),
        CliCommand::Stats => run_stats(app, format),
        CliCommand::Rate {
            category,
            name,
            stars,
        } => {
            app.checklist.set_stars(category, &name, stars);
            app.checklist.save(&app.data_dir)?;
            println!("{name}: {stars}/{MAX_STARS} stars");
            Ok(())
        }
        CliCommand::Help | CliCommand::Version => Ok(()),
    }
}

#[derive(Serialize)]
struct ListOutput {
    category: &'static str,
    items: Vec<Row>,
}

fn run_list(app: &mut App, options: ListOptions, format: OutputFormat) -> Result<()> {
    let categories: Vec<Category> = match options.category {
        Some(category) => vec![category],
        None => ALL.to_vec(),
    };
    app.show_available_only = options.available_only;
    for category in &categories {
        if let Some(location) = &options.location {
            app.select_location(*category, LocationSelection::Location(location.clone()));
        }
        if let Some(mode) = options.sort {
            app.sort[category.index()].mode = mode;
        }
    }

    let sections: Vec<ListOutput> = categories
        .iter()
        .map(|category| ListOutput {
            category: category.as_str(),
            items: app.visible_rows(*category),
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sections)?),
        OutputFormat::Text => {
            for section in &sections {
                println!("{} ({})", section.category, section.items.len());
                for row in &section.items {
                    let stars: String = (1..=MAX_STARS)
                        .map(|i| if i <= row.stars { '*' } else { '.' })
                        .collect();
                    let mut line = format!("  [{stars}] {}", row.name);
                    if !row.meta.is_empty() {
                        line.push_str(&format!("  ({})", row.meta));
                    }
                    if !row.available {
                        line.push_str("  [not available now]");
                    }
                    println!("{line}");
                }
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ClockOutput {
    minutes: u16,
    clock: String,
}

fn run_clock(app: &App, format: OutputFormat) -> Result<()> {
    let minutes = app.now_minutes();
    match format {
        OutputFormat::Json => {
            let output = ClockOutput {
                minutes,
                clock: gametime::format_minutes(minutes),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => println!("{}", app.clock_label()),
    }
    Ok(())
}

#[derive(Serialize)]
struct StatsOutput {
    category: &'static str,
    completed: usize,
    total: usize,
}

fn run_stats(app: &App, format: OutputFormat) -> Result<()> {
    let sections: Vec<StatsOutput> = ALL
        .iter()
        .map(|category| {
            let (completed, total) = app.progress(*category);
            StatsOutput {
                category: category.as_str(),
                completed,
                total,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sections)?),
        OutputFormat::Text => {
            for section in &sections {
                println!("{:<6} {}/{}", section.category, section.completed, section.total);
            }
            let (completed, total) = app.overall_progress();
            println!("total  {completed}/{total}");
        }
    }
    Ok(())
}

fn print_help() {
    println!("Heartsmith - Heartopia collectible checklist");
    println!();
    println!("Usage: heartsmith [command] [options]");
    println!();
    println!("Commands:");
    println!("  (none)                      open the TUI");
    println!("  list                        print the checklist");
    println!("  clock                       print the current in-game time");
    println!("  stats                       print completion per category");
    println!("  rate <category> <name> <stars>");
    println!("                              set an item's star rating (0-5)");
    println!("  help, version");
    println!();
    println!("Options:");
    println!("  -c, --category <name>       fish, bugs or birds");
    println!("  -a, --available             only items obtainable right now");
    println!("  -l, --location <name>       exact location filter");
    println!("  -s, --sort <mode>           default, level, location or name");
    println!("  -f, --format <text|json>    output format (default text)");
}
