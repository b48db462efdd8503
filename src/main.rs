//! Rubric CLI entrypoint: resolve one query against the local taxonomy.

use mimalloc::MiMalloc;

use rubric::config::Config;
use rubric::classifier::GenerativeClassifier;
use rubric::embedding::HttpEmbedder;
use rubric::resolver::{Resolver, ResolverConfig};
use rubric::taxonomy::JsonlTaxonomyStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "--help" {
        eprintln!("usage: rubric <query text>");
        eprintln!();
        eprintln!("Configuration is read from RUBRIC_* environment variables;");
        eprintln!("see Config in the library documentation.");
        std::process::exit(2);
    }
    let query = args.join(" ");

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        taxonomy_path = %config.taxonomy_path.display(),
        generate_model = %config.generate_model,
        embed_model = %config.embed_model,
        "Rubric starting"
    );

    let store = JsonlTaxonomyStore::new(config.taxonomy_path.clone());
    let classifier = GenerativeClassifier::new(config.classifier_config())?;
    let embedder = HttpEmbedder::new(config.embedder_config())?;

    let resolver = Resolver::new(classifier, embedder, store, ResolverConfig::default())?;

    let results = resolver.resolve(&query).await?;

    if results.is_empty() {
        println!("no matching categories");
        return Ok(());
    }

    for record in &results {
        println!("{}", serde_json::to_string_pretty(record)?);
    }

    Ok(())
}
