//! `heroes rename <id> <name>` – replace a hero's name.

use heroes_core::{Hero, HeroService};

pub async fn run_rename(service: &HeroService, id: i64, name: &str) {
    let hero = Hero {
        id,
        name: name.trim().to_string(),
    };
    match service.update(&hero).await {
        Some(_) => println!("Renamed hero {id} to {}", hero.name),
        None => println!("Hero {id} was not renamed."),
    }
}
