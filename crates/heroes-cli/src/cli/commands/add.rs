//! `heroes add <name>` – create a hero.

use heroes_core::{HeroService, NewHero};

pub async fn run_add(service: &HeroService, name: &str) {
    match service.create(&NewHero::new(name.trim())).await {
        Some(hero) => println!("Added hero {} ({})", hero.id, hero.name),
        None => println!("Hero was not added."),
    }
}
