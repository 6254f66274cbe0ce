//! `heroes search <query>` – one-shot name search.

use heroes_core::HeroService;

use super::print_heroes;

pub async fn run_search(service: &HeroService, query: &str) {
    print_heroes(&service.search(query).await);
}
