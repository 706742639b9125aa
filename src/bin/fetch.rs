//! Issues one GET per URL argument and prints each outcome.
//!
//! ```text
//! fetch http://localhost:3333/index.html http://localhost:3333/other.html
//! ```

use std::sync::mpsc;

use anyhow::Context;
use courier::client::Client;
use courier::config::Config;
use courier::Error;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        anyhow::bail!("usage: fetch <url>...");
    }

    let cfg = Config::load()?;
    let client = Client::with_workers(cfg.client.workers)?;
    let (done_tx, done_rx) = mpsc::channel();

    for (index, raw) in urls.iter().enumerate() {
        let url = url::Url::parse(raw).with_context(|| format!("invalid URL {raw}"))?;
        let host = url.host_str().context("URL missing host")?;
        let port = url.port_or_known_default().context("URL missing port")?;

        let mut uri = url.path().to_string();
        if let Some(query) = url.query() {
            uri.push('?');
            uri.push_str(query);
        }

        let mut request = client.create_request(index as u32 + 1);
        request.set_host(host);
        request.set_port(port);
        request.set_uri(uri);

        let done_tx = done_tx.clone();
        request.set_callback(move |req, resp, outcome| {
            match outcome {
                Ok(()) => println!(
                    "Request #{} has completed. Response:{}\n{}",
                    req.id(),
                    resp.status_message(),
                    String::from_utf8_lossy(resp.body())
                ),
                Err(Error::Canceled) => {
                    println!("Request #{} has been canceled by the user.", req.id())
                }
                Err(e) => println!("Request #{} failed! {}", req.id(), e),
            }
            let _ = done_tx.send(req.id());
        });

        request.execute();
    }
    drop(done_tx);

    for _ in done_rx {}

    client.close();
    Ok(())
}
