use std::io::{self, Write};
use std::path::Path;

use ddq_core::cache::{AssetRequest, CacheManifest, HttpFetcher, OfflineCache};
use ddq_core::db::CacheRepository;

use crate::cli::CacheCommands;
use crate::commands::common::{Context, Storage};
use crate::error::CliError;

pub async fn run_cache(ctx: &Context, command: CacheCommands) -> Result<(), CliError> {
    let storage = Storage::open(&ctx.db_path).await;
    if !storage.is_durable() {
        println!("Cache entries are kept for this run only");
    }
    let fetcher = HttpFetcher::new(&ctx.config.origin)?;
    let cache = OfflineCache::new(CacheManifest::default(), storage.cache_entries(), fetcher);

    match command {
        CacheCommands::Install => {
            let count = cache.install().await;
            if count == 0 {
                println!("Nothing cached; is {} reachable?", ctx.config.origin);
            } else {
                println!("Cached {count} assets in {}", cache.manifest().cache_name);
            }
        }
        CacheCommands::Activate => {
            let deleted = cache.activate().await?;
            if deleted.is_empty() {
                println!("No old caches");
            }
            for name in deleted {
                println!("Deleted {name}");
            }
        }
        CacheCommands::Fetch {
            url,
            navigate,
            output,
        } => {
            let request = if navigate {
                AssetRequest::navigation(url)
            } else {
                AssetRequest::new(url)
            };
            let response = cache
                .fetch(&request)
                .await
                .ok_or_else(|| CliError::NotAvailableOffline(request.url.clone()))?;
            tracing::info!(
                "{} {} {} ({} bytes)",
                response.status,
                response.kind.as_str(),
                response.url,
                response.body.len()
            );
            write_body(&response.body, output.as_deref())?;
        }
        CacheCommands::Sync { tag } => {
            if cache.handle_sync(&tag) {
                println!("Sync '{tag}' handled");
            } else {
                println!("Unknown sync tag '{tag}'");
            }
        }
        CacheCommands::Status => {
            let current = &cache.manifest().cache_name;
            println!("{current}: {} entries", cache.cached_count().await?);
            for name in storage.cache_entries().cache_names().await? {
                if &name != current {
                    println!("{name}: stale");
                }
            }
        }
    }

    Ok(())
}

fn write_body(body: &[u8], output_path: Option<&Path>) -> Result<(), CliError> {
    if let Some(path) = output_path {
        std::fs::write(path, body)?;
        println!("{}", path.display());
    } else {
        io::stdout().write_all(body)?;
    }
    Ok(())
}
