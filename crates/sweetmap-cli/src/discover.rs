//! `discover` command: wire config, provider and coordinator for one search.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sweetmap_core::{AppConfig, LatLng, SearchRequest, Venue};
use sweetmap_places::{
    CancellationToken, Discovery, DiscoveryCoordinator, DiscoveryOptions, PlacesClient,
    RetryingProvider, VenueProvider,
};

#[derive(Debug)]
pub(crate) struct DiscoverArgs {
    pub lat: f64,
    pub lng: f64,
    pub radius: Option<u32>,
    pub keywords: Vec<String>,
    pub json: bool,
}

/// Run one discovery call and print the result.
///
/// Ctrl-C cancels outstanding keyword searches; venues that already arrived
/// are still printed.
///
/// # Errors
///
/// Returns an error if the rules file or HTTP client cannot be set up, the
/// request is invalid, or every keyword search failed.
pub(crate) async fn run_discover(config: &AppConfig, args: &DiscoverArgs) -> anyhow::Result<()> {
    let rules = sweetmap_core::load_exclusion_rules(&config.exclusions_path).with_context(|| {
        format!(
            "failed to load exclusion rules from {}",
            config.exclusions_path.display()
        )
    })?;

    let request = build_request(config, args);
    let coordinator = DiscoveryCoordinator::new(build_provider(config)?, discovery_options(config));

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; cancelling outstanding searches");
            ctrl_c_cancel.cancel();
        }
    });

    let discovery = coordinator
        .discover_nearby_venues_with_cancel(&request, &rules, &cancel)
        .await
        .context("venue discovery failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&discovery_json(&discovery))?);
    } else {
        print!("{}", render_table(&discovery.venues));
    }

    if discovery.is_partial() {
        eprintln!("some results may be incomplete:");
        for failure in &discovery.partial_failures {
            eprintln!("  {failure}");
        }
    }

    Ok(())
}

fn build_request(config: &AppConfig, args: &DiscoverArgs) -> SearchRequest {
    let keywords = if args.keywords.is_empty() {
        &config.default_keywords
    } else {
        &args.keywords
    };
    SearchRequest::new(
        LatLng::new(args.lat, args.lng),
        args.radius.unwrap_or(config.default_radius_meters),
        keywords.iter().map(String::as_str),
    )
}

fn build_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn VenueProvider>> {
    let client = PlacesClient::with_base_url(
        &config.places_api_key,
        &config.places_base_url,
        Duration::from_secs(config.provider_timeout_secs),
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build places client: {e}"))?
    .with_language(config.places_language.clone());

    if config.provider_max_retries == 0 {
        return Ok(Arc::new(client));
    }
    Ok(Arc::new(RetryingProvider::new(
        client,
        config.provider_max_retries,
        config.provider_retry_backoff_ms,
    )))
}

fn discovery_options(config: &AppConfig) -> DiscoveryOptions {
    DiscoveryOptions {
        max_radius_meters: config.max_radius_meters,
        max_concurrency: config.discovery_concurrency,
        deadline: config.discovery_deadline_secs.map(Duration::from_secs),
    }
}

fn discovery_json(discovery: &Discovery) -> serde_json::Value {
    let failures: Vec<serde_json::Value> = discovery
        .partial_failures
        .iter()
        .map(|f| {
            serde_json::json!({
                "keyword": f.keyword,
                "kind": f.error.kind(),
                "error": f.error.to_string(),
            })
        })
        .collect();

    serde_json::json!({
        "venues": discovery.venues,
        "partial_failures": failures,
    })
}

fn render_table(venues: &[Venue]) -> String {
    if venues.is_empty() {
        return "no venues found\n".to_string();
    }

    let mut out = format!(
        "{:<8}{:<9}{:<7}{:<32}ADDRESS\n",
        "RATING", "REVIEWS", "PRICE", "NAME"
    );
    for venue in venues {
        let rating = venue
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        let reviews = venue
            .rating_count
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        let price = venue
            .price_level
            .map_or_else(|| "-".to_string(), price_symbol);
        out.push_str(&format!(
            "{rating:<8}{reviews:<9}{price:<7}{:<32}{}\n",
            truncate(&venue.name, 30),
            venue.address
        ));
    }
    out
}

fn price_symbol(level: u8) -> String {
    match level {
        0 => "free".to_string(),
        n => "$".repeat(usize::from(n)),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
