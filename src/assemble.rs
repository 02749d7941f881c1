//! Final article assembly
//!
//! Concatenates the reconciled body, the attribution template, the reference
//! list placeholder and the optional category links, in that fixed order.

use crate::segment::REFERENCES_PLACEHOLDER;

/// Assemble the output article.
///
/// `attribution_label` is the word "Translation" already translated into the
/// target language; `display_name` is the article title with underscores
/// replaced by spaces. `categories` are the translated category names with
/// the leading self-reference entry already dropped, in source order.
pub fn assemble(
    body: &str,
    attribution_label: &str,
    display_name: &str,
    revision: &str,
    categories: &[String],
) -> String {
    let mut out = String::with_capacity(body.len() + 128);
    out.push_str(body);

    out.push_str("\n{");
    out.push_str(attribution_label);
    out.push_str("|en|");
    out.push_str(display_name);
    out.push('|');
    out.push_str(revision);
    out.push_str("}\n");

    out.push('\n');
    out.push_str(REFERENCES_PLACEHOLDER);
    out.push('\n');

    for category in categories {
        out.push_str("[[");
        out.push_str(category);
        out.push_str("]]\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_attribution_template() {
        let result = assemble("body\n", "Překlad", "Albert Einstein", "1234567890", &[]);
        assert!(result.contains("\n{Překlad|en|Albert Einstein|1234567890}\n"));
    }

    #[test]
    fn test_assemble_order() {
        let categories = vec!["Města".to_string()];
        let result = assemble("body\n", "Překlad", "Brno", "42", &categories);
        let body = result.find("body").unwrap();
        let attribution = result.find("{Překlad").unwrap();
        let placeholder = result.find("<references />").unwrap();
        let category = result.find("[[Města]]").unwrap();
        assert!(body < attribution && attribution < placeholder && placeholder < category);
    }

    #[test]
    fn test_assemble_preserves_category_order_and_duplicates() {
        let categories = vec![
            "Řeky".to_string(),
            "Města".to_string(),
            "Řeky".to_string(),
        ];
        let result = assemble("", "Překlad", "X", "1", &categories);
        let tail = &result[result.find("<references />").unwrap()..];
        assert_eq!(tail.matches("[[Řeky]]").count(), 2);
        assert!(tail.find("[[Řeky]]").unwrap() < tail.find("[[Města]]").unwrap());
    }

    #[test]
    fn test_assemble_without_categories() {
        let result = assemble("body\n", "Translation", "X", "1", &[]);
        assert!(!result.contains("[["));
        assert!(result.ends_with("<references />\n"));
    }
}
