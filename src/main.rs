use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tripplanner::{ApiClient, NewTrip, Trip, TripPlannerConfig, WeatherData, logging, web};

#[derive(Parser)]
#[command(name = "tripplanner", version, about = "Plan trips with itineraries and weather")]
struct Cli {
    /// Path to a config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the trips API (overrides client.base_url)
    #[arg(long, global = true, env = "TRIPPLANNER_SERVER")]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Work with trips on a running server
    Trips {
        #[command(subcommand)]
        command: TripsCommand,
    },
    /// Show the weather for a location
    Weather { location: String },
}

#[derive(Subcommand)]
enum TripsCommand {
    List {
        /// Search title, description and destinations
        #[arg(long)]
        search: Option<String>,
        /// planned, ongoing or completed
        #[arg(long)]
        status: Option<String>,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "destination")]
        destinations: Vec<String>,
    },
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = TripPlannerConfig::load_from_path(cli.config.clone())?;
    if let Some(server) = cli.server {
        config.client.base_url = server;
    }

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            logging::init(&config.logging)?;
            let state = tripplanner::default_state(&config).context("Failed to build state")?;
            web::run(&config, state).await
        }
        Command::Trips { command } => {
            let client = ApiClient::new(config.client.base_url.clone())?;
            run_trips(&client, command).await
        }
        Command::Weather { location } => {
            let client = ApiClient::new(config.client.base_url.clone())?;
            let weather = client.weather(&location).await?;
            print_weather(&weather);
            Ok(())
        }
    }
}

async fn run_trips(client: &ApiClient, command: TripsCommand) -> Result<()> {
    match command {
        TripsCommand::List { search, status } => {
            let trips = client
                .list_trips(search.as_deref(), status.as_deref())
                .await?;
            if trips.is_empty() {
                println!("No trips found");
            }
            for trip in &trips {
                println!(
                    "{:<16} {:<10} {} ({} - {})",
                    trip.id,
                    trip.status.as_str(),
                    trip.title,
                    trip.start_date,
                    trip.end_date
                );
            }
        }
        TripsCommand::Show { id } => match client.get_trip(&id).await? {
            Some(trip) => print_trip(&trip),
            None => println!("Trip not found"),
        },
        TripsCommand::Create {
            title,
            start,
            end,
            description,
            destinations,
        } => {
            let new_trip = NewTrip {
                title: Some(title),
                start_date: Some(start),
                end_date: Some(end),
                description,
                destinations,
                ..NewTrip::default()
            };
            let trip = client.create_trip(&new_trip).await?;
            println!("Created trip {}", trip.id);
        }
        TripsCommand::Delete { id } => {
            client.delete_trip(&id).await?;
            println!("Deleted trip {id}");
        }
    }
    Ok(())
}

fn print_trip(trip: &Trip) {
    println!("{} [{}]", trip.title, trip.status);
    println!("   📅 {} - {}", trip.start_date, trip.end_date);
    if let Some(days) = trip.duration_days() {
        println!("   ⏰ {days} days");
    }
    if !trip.destinations.is_empty() {
        println!("   🗺️ {}", trip.destinations.join(" → "));
    }
    if let Some(cost) = trip.total_cost {
        println!("   💰 ${cost:.0}");
    }
    let travel_cost = trip.travel_cost();
    if travel_cost > 0.0 {
        println!("   🚆 ${travel_cost:.0} in travel");
    }
    if !trip.description.is_empty() {
        println!("   {}", trip.description);
    }
    for day in &trip.days {
        println!("\n   {} - {}", day.date, day.location);
        for activity in &day.activities {
            println!("     • {activity}");
        }
        for mode in &day.travel_modes {
            println!(
                "     {:?}: {} → {} ({})",
                mode.kind, mode.from, mode.to, mode.duration
            );
        }
        if let Some(accommodation) = &day.accommodation {
            println!("     🏨 {accommodation}");
        }
    }
}

fn print_weather(weather: &WeatherData) {
    println!("{}: {}, {}", weather.location, weather.format_temperature(), weather.condition);
    println!("   Humidity {}%  Wind {}", weather.humidity, weather.format_wind());
    for day in &weather.forecast {
        println!("   {}  {}° / {}°  {}", day.date, day.high, day.low, day.condition);
    }
}
