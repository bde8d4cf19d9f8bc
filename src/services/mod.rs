pub(crate) mod game_service;
pub(crate) mod parsing;
pub(crate) mod scraping;
