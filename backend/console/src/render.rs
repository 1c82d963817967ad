//! Plain-text rendering of catalog payloads for the terminal.
use std::fmt::Write;

use catalog::{
    Aggregate, Link, Resource, Searchable,
    models::{Item, Listing},
    pagination::PageWindow,
    search::SearchGroup,
};

fn banner(out: &mut String, message: &str) {
    let _ = writeln!(out, "! {message}");
}

pub fn listing<R: Resource>(listing: &Listing<R>, rows: &[R]) -> String {
    let mut out = String::new();

    if listing.uses_mock_data() {
        banner(&mut out, &listing.message);
    }

    if rows.is_empty() {
        let _ = writeln!(out, "No {} found", R::LABEL);
    }

    for row in rows {
        let _ = writeln!(out, "{:>6}  {}", row.id(), row.display_name());
    }

    let window = PageWindow::new(listing.page, listing.limit, listing.total);
    let _ = write!(
        out,
        "Showing {} (page {}/{})",
        window.range_label(),
        window.page,
        window.total_pages().max(1)
    );

    out
}

pub fn item<R: Resource>(item: &Item<R>) -> serde_json::Result<String> {
    let mut out = String::new();

    if item.uses_mock_data() {
        banner(&mut out, &item.message);
    }
    out.push_str(&serde_json::to_string_pretty(&item.data)?);

    Ok(out)
}

pub fn links<L: Link>(aggregate: &Aggregate<L>, rows: &[L]) -> String {
    let mut out = String::new();

    for link in rows {
        let _ = writeln!(
            out,
            "{:>6} -> {:<6}  {}",
            link.parent_id(),
            link.child_id(),
            link.haystack().join(" | ")
        );
    }

    let _ = write!(
        out,
        "{} of {} {} across {} parents",
        rows.len(),
        aggregate.links.len(),
        L::CHILD,
        aggregate.parents
    );

    if !aggregate.skipped.is_empty() {
        let skipped: Vec<String> = aggregate.skipped.iter().map(u64::to_string).collect();
        let _ = write!(out, "\n! Skipped parents: {}", skipped.join(", "));
    }

    out
}

pub fn search(groups: &[SearchGroup]) -> String {
    if groups.is_empty() {
        return "No results".to_string();
    }

    let mut out = String::new();

    for group in groups {
        let _ = writeln!(out, "{} ({})", group.label, group.results.len());

        for result in &group.results {
            let _ = writeln!(
                out,
                "  {}  {}",
                result.title,
                result.url.as_deref().unwrap_or("-")
            );
        }
    }

    out.trim_end().to_string()
}
