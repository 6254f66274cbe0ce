//! `heroes show <id>`.

use heroes_core::HeroService;

pub async fn run_show(service: &HeroService, id: i64) {
    match service.fetch_by_id(id).await {
        Some(hero) => println!("{}: {}", hero.id, hero.name),
        None => println!("Hero {id} not found."),
    }
}
