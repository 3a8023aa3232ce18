mod fake;
mod scrape;
