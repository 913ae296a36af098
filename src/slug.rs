use deunicode::deunicode_with_tofu;

use crate::company::Company;

/// Derive the lookup-site path segment from a company name.
///
/// Lowercases, turns spaces and periods into hyphens, then transliterates
/// accented characters to plain ASCII (e.g. "Công Ty ABC" -> "cong-ty-abc").
/// Characters with no ASCII equivalent are dropped. Other punctuation is
/// left as-is; the site may answer those with a 404, which the enricher
/// treats as a miss.
pub fn lookup_slug(name: &str) -> String {
    let hyphenated = name.to_lowercase().replace(' ', "-").replace('.', "-");
    deunicode_with_tofu(&hyphenated, "")
}

/// Build the lookup page URL: `<base>/<tax code>-<slug>`
pub fn lookup_url(base_url: &str, company: &Company) -> String {
    format!(
        "{}/{}-{}",
        base_url.trim_end_matches('/'),
        company.tax_code,
        company.lookup_slug()
    )
}
