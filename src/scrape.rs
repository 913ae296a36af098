//! Contact extraction from tax-lookup result pages
//!
//! The result page marks its company table up with schema.org microdata.
//! Two cells are read:
//! - `td[itemprop="telephone"]` -> phone number
//! - `td[itemprop="name"]` -> other contact info
//!
//! The `name` cell usually holds the company's legal representative, not a
//! contact channel. It is extracted as-is into `other_contact_info`.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::company::ContactPatch;

const TELEPHONE_SELECTOR: &str = r#"td[itemprop="telephone"]"#;
const NAME_SELECTOR: &str = r#"td[itemprop="name"]"#;

/// Extract the phone number and other-contact cells from a result page.
///
/// Only the first matching element of each kind is used. A marker that is
/// present but empty still yields `Some("")`.
pub fn extract_contact(html: &str) -> ContactPatch {
    let document = Html::parse_document(html);

    let patch = ContactPatch {
        phone_number: first_text(&document, TELEPHONE_SELECTOR),
        other_contact_info: first_text(&document, NAME_SELECTOR),
    };

    debug!(
        "Extracted telephone={:?} name={:?}",
        patch.phone_number, patch.other_contact_info
    );
    patch
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
