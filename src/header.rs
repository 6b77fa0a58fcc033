//! File header generator

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

pub const DEFAULT_VERSION: &str = "0.0.1";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields of the header block prepended to annotated output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub author: Option<String>,
    pub version: String,
    pub copyright: Option<String>,
    pub date_format: String,
}

impl Default for HeaderInfo {
    fn default() -> Self {
        Self {
            author: None,
            version: DEFAULT_VERSION.to_string(),
            copyright: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Whether `format` is a usable strftime pattern
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Render the header block, ending with a newline.
///
/// The `@author:` line is always present, left blank when no author is set.
/// The copyright line is left out when unset. An invalid date format falls
/// back to ISO dates instead of panicking inside `Display`.
pub fn generate_header(info: &HeaderInfo, date: NaiveDate) -> String {
    let fmt = if is_valid_date_format(&info.date_format) {
        info.date_format.as_str()
    } else {
        DEFAULT_DATE_FORMAT
    };

    let mut header = String::from("/**\n *\n");
    header.push_str(&format!(" * @date: {}\n", date.format(fmt)));
    match &info.author {
        Some(author) => header.push_str(&format!(" * @author: {}\n", author)),
        None => header.push_str(" * @author:\n"),
    }
    header.push_str(&format!(" * @version: {}\n", info.version));
    if let Some(copyright) = &info.copyright {
        header.push_str(&format!(" * @copyright {}\n", copyright));
    }
    header.push_str(" */\n");
    header
}

/// Header followed by `body`
pub fn prepend_header(info: &HeaderInfo, date: NaiveDate, body: &str) -> String {
    let mut out = generate_header(info, date);
    out.push_str(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 11, 5).unwrap()
    }

    #[test]
    fn test_default_header() {
        assert_eq!(
            generate_header(&HeaderInfo::default(), date()),
            "/**\n *\n * @date: 2018-11-05\n * @author:\n * @version: 0.0.1\n */\n"
        );
    }

    #[test]
    fn test_author_line_present_without_author() {
        let header = generate_header(&HeaderInfo::default(), date());
        assert!(header.contains(" * @author:\n"));
        assert!(!header.contains("@copyright"));
    }

    #[test]
    fn test_full_header() {
        let info = HeaderInfo {
            author: Some("Front-end Team <fe@example.com>".to_string()),
            version: "1.2.0".to_string(),
            copyright: Some("Copyright (c) 2018, Example".to_string()),
            date_format: "%Y/%m/%d".to_string(),
        };
        let header = generate_header(&info, date());
        assert!(header.contains(" * @date: 2018/11/05\n"));
        assert!(header.contains(" * @author: Front-end Team <fe@example.com>\n"));
        assert!(header.contains(" * @version: 1.2.0\n"));
        assert!(header.contains(" * @copyright Copyright (c) 2018, Example\n"));
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let info = HeaderInfo {
            date_format: "%Q".to_string(),
            ..HeaderInfo::default()
        };
        assert!(!is_valid_date_format("%Q"));
        assert!(generate_header(&info, date()).contains("@date: 2018-11-05"));
    }

    #[test]
    fn test_prepend_keeps_body() {
        let out = prepend_header(&HeaderInfo::default(), date(), "const a = 1;\n");
        assert!(out.starts_with("/**\n"));
        assert!(out.ends_with(" */\nconst a = 1;\n"));
    }
}
