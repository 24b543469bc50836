use bookmark_search::host::{HostContext, ResultSink, SystemOpener, Window};
use bookmark_search::logging;
use bookmark_search::plugin::Plugin;
use bookmark_search::plugins::bookmarks::BookmarksPlugin;
use bookmark_search::results::SearchResult;
use bookmark_search::settings::{Settings, SETTINGS_FILE};
use bookmark_search::toast_log::ToastLogNotifier;
use std::io::BufRead;
use std::sync::Arc;

/// Prints batches and icon patches as they arrive.
struct StdoutSink;

impl ResultSink for StdoutSink {
    fn add_or_replace(&self, results: Vec<SearchResult>) {
        for r in results {
            let icon = match &r.icon {
                Some(icon) => icon.url().unwrap_or("default"),
                None => "pending",
            };
            println!("+ [{}] {} <{}> score={} icon={}", r.id, r.title, r.payload, r.score, icon);
        }
    }

    fn remove(&self, id: &str) {
        println!("- [{id}]");
    }
}

struct StdoutWindow;

impl Window for StdoutWindow {
    fn close(&self) {
        println!("(closed)");
    }
}

/// Reads queries line by line. `:open <n>` runs the n-th result of the last
/// query and `:quit` exits.
fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging, settings.log_file.clone());

    let host = HostContext {
        notifier: Arc::new(ToastLogNotifier::new(settings.enable_toasts)),
        opener: Arc::new(SystemOpener),
        sink: Arc::new(StdoutSink),
        window: Arc::new(StdoutWindow),
    };
    let plugin = BookmarksPlugin::startup(&settings, host);

    let mut last: Vec<SearchResult> = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed == ":quit" {
            break;
        }
        if let Some(rest) = trimmed.strip_prefix(":open") {
            match rest.trim().parse::<usize>().ok().and_then(|n| last.get(n)) {
                Some(r) => plugin.execute(&r.id, &r.payload),
                None => eprintln!("no such result"),
            }
            continue;
        }
        last = plugin.search(&line);
    }
    Ok(())
}
