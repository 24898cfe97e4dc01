//! Parkscout - browse US national park sites and nearby places
//!
//! Interactive command loop: pick a state, get a numbered list of its
//! national park sites, then pick a site to see points of interest near its
//! postal code. Every page and API response is cached on disk keyed by URL,
//! so repeated runs avoid re-fetching unchanged pages.

use std::env;
use std::io::{self, Write};

use clap::Parser;

use parkscout::cache::CacheStore;
use parkscout::cli::{Cli, StartupConfig};
use parkscout::data::{NpsClient, ParkSite, PlacesClient};

/// Environment variable holding the MapQuest API key
const API_KEY_VAR: &str = "MAPQUEST_API_KEY";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli);

    let cache_path = match config.cache_path {
        Some(path) => path,
        None => CacheStore::default_path()
            .ok_or("could not determine a cache directory; pass --cache <PATH>")?,
    };

    // The single process-wide cache; every fetch below borrows it
    let mut store = CacheStore::open(cache_path);

    let nps = NpsClient::new();
    let places = env::var(API_KEY_VAR).ok().map(PlacesClient::new);
    if places.is_none() {
        println!("Note: set {API_KEY_VAR} to enable nearby-places lookups.");
    }

    let states = nps.state_index(&mut store).await?;

    let mut pending_state = config.initial_state;
    let mut sites: Vec<ParkSite> = Vec::new();
    let mut prompt_for_state = true;

    loop {
        if prompt_for_state {
            let state_name = match pending_state.take() {
                Some(name) => name,
                None => match prompt("Please input a state name or exit: ")? {
                    Some(line) => line.to_lowercase(),
                    None => break,
                },
            };
            if state_name == "exit" {
                break;
            }
            let Some(state_url) = states.get(&state_name) else {
                println!("[ERROR] Please enter a proper state name.");
                continue;
            };

            sites = nps.sites_for_state(state_url, &mut store).await?;
            print_site_list(&state_name, &sites);
        }
        prompt_for_state = false;

        let Some(choice) = prompt("Choose a number for detail search or exit or back: ")? else {
            break;
        };
        if choice == "exit" {
            break;
        }
        if choice == "back" {
            prompt_for_state = true;
            continue;
        }

        let number = match choice.parse::<usize>() {
            Ok(n) if n >= 1 && n <= sites.len() => n,
            _ => {
                println!("[ERROR] Please enter a valid number.");
                continue;
            }
        };
        let site = &sites[number - 1];

        print_header(&format!("Places near {}", site.name));
        match &places {
            Some(client) => {
                let found = client.nearby(&site.zipcode, &mut store).await?;
                if found.is_empty() {
                    println!("No places found.");
                }
                for place in &found {
                    println!("{}", place.describe());
                }
            }
            None => println!("Set {API_KEY_VAR} to enable nearby-places lookups."),
        }
    }

    Ok(())
}

/// Prints a dashed header line above and below `title`
fn print_header(title: &str) {
    let rule = "-".repeat(title.len());
    println!("{rule}");
    println!("{title}");
    println!("{rule}");
}

/// Prints the numbered site listing for a state
fn print_site_list(state_name: &str, sites: &[ParkSite]) {
    print_header(&format!("List of national sites in {state_name}"));
    for (index, site) in sites.iter().enumerate() {
        println!("[{}] {}", index + 1, site.info());
    }
}

/// Prompts on stdout and reads one trimmed line from stdin
///
/// Returns `None` on end of input, which the caller treats like `exit`.
fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
