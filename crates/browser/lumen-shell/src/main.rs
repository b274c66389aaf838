//! Lumen Shell - Main Entry Point
//!
//! Builds the demo page, starts the accessibility layer and replays key
//! presses against it.
//!
//! ```text
//! lumen-shell [--config <file>] [--storage <dir>] [--locale <tag>] [--open-dialog] [keys...]
//! ```

mod page;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use lumen_a11y::{Config, Enhancer, KeyboardEvent, Locale, MediaPreferences, PageEvent, Storage};
use tracing_subscriber::EnvFilter;

const ORIGIN: &str = "https://lumen.example";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    storage: Option<PathBuf>,
    locale: Option<String>,
    open_dialog: bool,
    keys: Vec<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(args.next().context("--config needs a file")?.into()),
            "--storage" => parsed.storage = Some(args.next().context("--storage needs a directory")?.into()),
            "--locale" => parsed.locale = Some(args.next().context("--locale needs a tag")?),
            "--open-dialog" => parsed.open_dialog = true,
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            key => parsed.keys.push(key.to_string()),
        }
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(tag) = &args.locale {
        config.locale = Locale::parse(tag)?;
    }

    let storage = match &args.storage {
        Some(dir) => Storage::for_origin(dir, ORIGIN),
        None => Storage::session(),
    };

    let mut doc = page::demo_page(&format!("{ORIGIN}/"))?;
    let mut enhancer = Enhancer::new(config, storage);

    enhancer.start(&mut doc, &MediaPreferences::from_system());
    enhancer.dispatch(&mut doc, PageEvent::Ready);

    if args.open_dialog {
        let dialog = doc
            .get_element_by_id("settings")
            .context("demo page has no settings dialog")?;
        if !enhancer.state_mut().open_dialog(&mut doc, dialog) {
            tracing::warn!("Settings dialog could not be opened");
        }
        enhancer.pump(&mut doc);
    }

    for combo in &args.keys {
        let target = doc.active_element().unwrap_or(doc.body());
        let Some(event) = KeyboardEvent::from_combo(combo, target) else {
            tracing::warn!("Skipping unrecognized key {:?}", combo);
            continue;
        };
        let outcome = enhancer.dispatch(&mut doc, PageEvent::KeyDown(event));
        tracing::info!(
            "{} -> focus: {}, prevented: {}",
            combo,
            page::describe(&doc, doc.active_element()),
            outcome.default_prevented
        );
        if let Some(text) = live_region_text(&enhancer, &doc) {
            tracing::info!("Announced: {}", text);
        }
    }

    let window = enhancer.state().config.announce_clear_ms;
    enhancer.advance(&mut doc, window);

    let state = enhancer.state();
    println!("theme:   {}", state.theme.active().as_str());
    println!("focus:   {}", page::describe(&doc, doc.active_element()));
    println!("live:    {:?}", state.announcer.text(&doc));
    println!("storage: {}", if state.theme.store().storage().is_persistent() { "local" } else { "session" });
    Ok(())
}

fn live_region_text(enhancer: &Enhancer, doc: &lumen_dom::Document) -> Option<String> {
    let text = enhancer.state().announcer.text(doc);
    (!text.is_empty()).then_some(text)
}
