use std::path::{Path, PathBuf};

pub const HEADER: &str = "Tax code,Company name,Address number,Street,Ward,District,Province,Website,Facebook,Linkedin,Email,Phone number,Thông tin liên lạc khác";

/// A data row with only tax code, name, phone and other contact set
pub fn row(tax_code: &str, name: &str, phone: &str, other: &str) -> String {
    format!("{},{},,,,,,,,,,{},{}", tax_code, name, phone, other)
}

/// Write an input CSV with the standard header and the given rows
pub fn write_input_csv(dir: &Path, rows: &[String]) -> PathBuf {
    let path = dir.join("data.csv");
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).expect("write input csv");
    path
}

/// Write a config file pointing the lookup client at `base_url`
pub fn write_config(dir: &Path, base_url: &str, output: &Path, on_fetch_error: &str) -> PathBuf {
    let path = dir.join("company-enricher.toml");
    let content = format!(
        r#"[lookup]
base_url = "{}"
user_agent = "company-enricher-tests/1.0"
request_timeout_secs = 5

[batch]
on_fetch_error = "{}"

[output]
path = "{}"
"#,
        base_url,
        on_fetch_error,
        output.display().to_string().replace('\\', "\\\\")
    );
    std::fs::write(&path, content).expect("write config");
    path
}

/// Lookup result page with optional telephone and name cells
pub fn lookup_page(telephone: Option<&str>, name: Option<&str>) -> String {
    let mut rows = String::new();
    if let Some(name) = name {
        rows.push_str(&format!(
            "<tr><td>Người đại diện</td><td itemprop=\"name\">{}</td></tr>",
            name
        ));
    }
    if let Some(telephone) = telephone {
        rows.push_str(&format!(
            "<tr><td>Điện thoại</td><td itemprop=\"telephone\">{}</td></tr>",
            telephone
        ));
    }
    format!(
        "<html><body><table class=\"table-taxinfo\"><tbody>{}</tbody></table></body></html>",
        rows
    )
}

/// Parse an output CSV into rows (header excluded)
pub fn read_output(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).expect("open output csv");
    reader.records().map(|r| r.expect("output row")).collect()
}
