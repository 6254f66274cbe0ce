//! `heroes remove <id>`.

use heroes_core::HeroService;

pub async fn run_remove(service: &HeroService, id: i64) {
    match service.remove(id).await {
        Some(_) => println!("Removed hero {id}"),
        None => println!("Hero {id} was not removed."),
    }
}
