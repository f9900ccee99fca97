use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

/// Read the whole response body and parse it as a full HTML page.
pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read the page body");

    Html::parse_document(&String::from_utf8_lossy(&bytes))
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Page has HTML parsing errors: {:?}",
        html.errors
    );
}

/// The trimmed text of every element matching `selector`, in document order.
#[track_caller]
pub(crate) fn select_text(html: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).expect("Invalid CSS selector");

    html.select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_owned())
        .collect()
}

/// The number of body rows in the table with the id `table_id`.
#[track_caller]
pub(crate) fn count_table_rows(html: &Html, table_id: &str) -> usize {
    let selector =
        Selector::parse(&format!("table#{table_id} tbody tr")).expect("Invalid CSS selector");

    html.select(&selector).count()
}
