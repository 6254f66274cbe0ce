//! `heroes list` – show every hero.

use heroes_core::HeroService;

use super::print_heroes;

pub async fn run_list(service: &HeroService) {
    print_heroes(&service.fetch_all().await);
}
