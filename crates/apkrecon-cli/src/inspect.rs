use apkrecon_config::config::Config;
use apkrecon_key::{
    digest::status_digest_with, Architectures, Key, KeyParser, PackageRecord,
};
use nu_ansi_term::Color::{Blue, Cyan, Green, LightRed, Magenta};
use serde_json::json;
use tracing::info;

use crate::{error::CliResult, utils::Colored};

fn key_json(key: &Key) -> serde_json::Value {
    json!({
        "key": key.to_string(),
        "host": key.host(),
        "repo_path": key.repo_path(),
        "repository_uri": key.repository_uri(),
        "name": key.package().name(),
        "version": key.package().version(),
        "arch": key.arch(),
    })
}

pub fn parse_keys(parser: &KeyParser, keys: &[String], json: bool) -> CliResult<()> {
    let parsed = keys
        .iter()
        .map(|raw| parser.parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        let values: Vec<_> = parsed.iter().map(key_json).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    for key in &parsed {
        info!(
            "{}-{} ({})",
            Colored(Blue, key.package().name()),
            Colored(LightRed, key.package().version()),
            Colored(Cyan, key.arch())
        );
        info!("  host:       {}", key.host());
        info!("  repository: {}", Colored(Green, key.repo_path()));
        info!("  uri:        {}", key.repository_uri());
    }

    Ok(())
}

pub fn print_url(parser: &KeyParser, raw: &str, json: bool) -> CliResult<()> {
    let url = parser.parse(raw)?.url()?;
    if json {
        println!("{}", json!({ "url": url.as_str() }));
    } else {
        info!("{url}");
    }
    Ok(())
}

pub fn print_digest(config: &Config, checksum: &str, index: bool, json: bool) -> CliResult<()> {
    let record = if index {
        PackageRecord::default().with_index_checksum(checksum)?
    } else {
        PackageRecord::default().with_checksum(hex::decode(checksum)?)
    };

    let digest = status_digest_with(&record, config.status_host(), config.status_repository())?;

    if json {
        println!("{}", serde_json::to_string(&digest)?);
    } else {
        info!("{}", Colored(Magenta, &digest));
    }
    Ok(())
}

pub fn list_archs(archs: &Architectures, json: bool) -> CliResult<()> {
    if json {
        let values: Vec<_> = archs.iter().collect();
        println!("{}", serde_json::to_string(&values)?);
        return Ok(());
    }

    for arch in archs.iter() {
        info!("{}", Colored(Cyan, arch));
    }
    Ok(())
}
