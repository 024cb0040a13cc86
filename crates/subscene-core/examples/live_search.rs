use subscene_core::{QueryResult, SubsceneScraper};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scraper = SubsceneScraper::new()?;

    println!("🔍 Searching for 'Inception'...\n");

    let subtitles = match scraper.query("Inception").await? {
        QueryResult::Subtitles(entries) => {
            println!("Direct hit with {} subtitles", entries.len());
            entries
        }
        QueryResult::Productions(groups) => {
            println!("Found {} production groups:", groups.len());
            for group in &groups {
                println!("  [{}]", group.label);
                for entry in &group.entries {
                    println!("    • {} ({})", entry.name, entry.url);
                }
            }

            let Some(production) = groups.first().and_then(|g| g.entries.first()) else {
                println!("\nNo productions matched.");
                return Ok(());
            };

            println!("\n📋 Listing subtitles for: {}\n", production.name);
            scraper.query_for_production(production).await?
        }
    };

    for (i, entry) in subtitles.iter().take(10).enumerate() {
        println!("  {}. {} [{}]", i + 1, entry.name, entry.language);
    }

    if let Some(subtitle) = subtitles.first() {
        println!("\n⬇ Downloading: {}", subtitle.name);
        let bytes = scraper.download(subtitle).await?;
        println!("Received {} bytes", bytes.len());
    }

    Ok(())
}
