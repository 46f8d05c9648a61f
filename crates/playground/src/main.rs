use std::{env, fmt::Debug, process};

use dusseldorf::{ClientConfig, DisabledParking, Garage, OdpDusseldorf, ParkAndRide, DEFAULT_LIMIT};
use serde::Serialize;

const USAGE: &str =
    "usage: playground [garages|park-and-rides|disabled-parkings|all] [limit] [--json]";

/// All datasets in one JSON document.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AllLocations {
    garages: Vec<Garage>,
    park_and_rides: Vec<ParkAndRide>,
    disabled_parkings: Vec<DisabledParking>,
}

fn print_locations<T: Debug + Serialize>(locations: &[T], json: bool) {
    if json {
        let json = serde_json::to_string_pretty(locations).unwrap();
        println!("{}", json);
        return;
    }

    for location in locations {
        println!("{:?}", location);
    }
    println!("{} locations found", locations.len());
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let (flags, args): (Vec<String>, Vec<String>) =
        env::args().skip(1).partition(|arg| arg.starts_with("--"));
    let json = flags.iter().any(|flag| flag == "--json");
    let dataset = args.first().map(String::as_str).unwrap_or("all");
    let limit = match args.get(1).map(|limit| limit.parse::<u32>()) {
        Some(Ok(limit)) => limit,
        Some(Err(why)) => {
            eprintln!("invalid limit: {why}\n{USAGE}");
            process::exit(2);
        }
        None => DEFAULT_LIMIT,
    };

    let config = ClientConfig::env().expect("invalid configuration in env.");
    let client = OdpDusseldorf::new(config);

    let result = match dataset {
        "garages" => client
            .garages(limit)
            .await
            .map(|garages| print_locations(&garages, json)),
        "park-and-rides" => client
            .park_and_rides(limit)
            .await
            .map(|park_and_rides| print_locations(&park_and_rides, json)),
        "disabled-parkings" => client
            .disabled_parkings()
            .await
            .map(|disabled_parkings| print_locations(&disabled_parkings, json)),
        "all" => futures::try_join!(
            client.garages(limit),
            client.park_and_rides(limit),
            client.disabled_parkings(),
        )
        .map(|(garages, park_and_rides, disabled_parkings)| {
            if json {
                let all = AllLocations {
                    garages,
                    park_and_rides,
                    disabled_parkings,
                };
                println!("{}", serde_json::to_string_pretty(&all).unwrap());
            } else {
                print_locations(&garages, json);
                print_locations(&park_and_rides, json);
                print_locations(&disabled_parkings, json);
            }
        }),
        other => {
            eprintln!("unknown dataset '{other}'\n{USAGE}");
            process::exit(2);
        }
    };
    client.close().await;

    if let Err(why) = result {
        log::error!("{:?}", why);
        eprintln!("{why}");
        process::exit(1);
    }
}
