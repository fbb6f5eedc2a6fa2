//! Service probes: `askai health`, `askai status` and `askai debug`.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::service::HttpAnswerService;

pub async fn run_health(config: &Config) -> Result<()> {
    let service = HttpAnswerService::new(&config.service)?;
    let health = service
        .health()
        .await
        .with_context(|| format!("health check failed for {}", service.base_url()))?;

    println!("{:<10} {}", "SERVICE", service.base_url());
    println!("{:<10} {}", "STATUS", health.status);
    if let Some(ts) = health.timestamp {
        println!("{:<10} {}", "TIMESTAMP", ts);
    }
    Ok(())
}

pub async fn run_status(config: &Config) -> Result<()> {
    let service = HttpAnswerService::new(&config.service)?;
    let info = service
        .info()
        .await
        .with_context(|| format!("failed to query {}", service.base_url()))?;

    let unknown = "-".to_string();
    println!("{:<10} {}", "SERVICE", service.base_url());
    println!("{:<10} {}", "NAME", info.message.as_ref().unwrap_or(&unknown));
    println!("{:<10} {}", "STATUS", info.status.as_ref().unwrap_or(&unknown));
    println!("{:<10} {}", "VERSION", info.version.as_ref().unwrap_or(&unknown));
    match info.documents {
        Some(n) => println!("{:<10} {}", "DOCUMENTS", n),
        None => println!("{:<10} {}", "DOCUMENTS", unknown),
    }
    if !info.endpoints.is_empty() {
        println!("ENDPOINTS");
        for endpoint in &info.endpoints {
            println!("  {}", endpoint);
        }
    }
    Ok(())
}

pub async fn run_debug(config: &Config) -> Result<()> {
    let service = HttpAnswerService::new(&config.service)?;
    let debug = service
        .debug_info()
        .await
        .with_context(|| format!("failed to query {}", service.base_url()))?;

    let count = |n: Option<u64>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
    let text = |t: &Option<String>| t.clone().unwrap_or_else(|| "-".to_string());
    println!("{:<10} {}", "SERVICE", service.base_url());
    println!("{:<10} {}", "DOCUMENTS", count(debug.documents_count));
    println!("{:<10} {}", "FILES", count(debug.files_count));
    println!("{:<10} {}", "VECTORIZER", text(&debug.vectorizer));
    println!("{:<10} {}", "MATRIX", text(&debug.matrix));
    if let Some(sample) = &debug.sample_document {
        println!("SAMPLE");
        println!("  {}", sample);
    }
    Ok(())
}
