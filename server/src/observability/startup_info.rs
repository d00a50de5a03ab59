use tracing::info;

use claim_geo_application::infrastructure_config::Config;

pub fn print_api_info(config: &Config) {
    print_routes(config);
    print_configuration_info(config);
}

fn print_routes(config: &Config) {
    let base_url = format!("http://{}", config.server_address());
    info!("Routes:");
    info!("  GET    {}/health", base_url);
    info!("  GET    {}/geocode/resolve?state=&district=&village=", base_url);
    info!("  DELETE {}/geocode/cache", base_url);
    info!("  POST   {}/claims/map-points", base_url);
    info!("  GET    {}/report?state=&district=&village=&noCache=", base_url);
}

fn print_configuration_info(config: &Config) {
    info!("Configuration ({}):", config.environment.env);
    info!(
        "  Boundary services: village={} district={} state={} (timeout {}ms)",
        config.boundary.village_service_url,
        config.boundary.district_service_url,
        config.boundary.state_service_url,
        config.boundary.request_timeout_ms
    );
    info!(
        "  Resolver: cache capacity {}, enrichment concurrency {}, max records {}",
        config.resolver.cache_capacity,
        config.resolver.enrichment_concurrency,
        config.resolver.max_records
    );
    info!(
        "  Report proxy: {} (ttl {}s, timeout {}ms, slow after {}ms)",
        config.report.upstream_base_url,
        config.report.ttl_seconds,
        config.report.timeout_ms,
        config.report.slow_request_ms
    );
}
