//! Extracts CSV links from the forecast directory-index page.

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};

/// Returns the filenames of the CSV resources linked from an index page, in
/// document order.
///
/// Any anchor without an href attribute is an error; the listing pages always
/// carry one and a page that does not is not a listing.
pub fn csv_links(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").unwrap();

    let mut files = Vec::new();
    for anchor in document.select(&anchors) {
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| anyhow!("Directory listing contains an anchor without an href"))?;

        if href.ends_with(".csv") {
            files.push(href.to_string());
        }
    }

    Ok(files)
}

// -- Tests -------------------------------------------------------------------
