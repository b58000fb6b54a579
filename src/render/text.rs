//! Plain text table renderer.

use crate::model::{DatasetVariant, ProductRecord};
use unicode_width::UnicodeWidthStr;

/// Render records as a bordered text table with a header row.
///
/// Column widths are measured in terminal cells, so wide characters line
/// up. With no records the body is a single row spanning the table that
/// carries `empty_message`.
pub fn to_text(records: &[&ProductRecord], variant: DatasetVariant, empty_message: &str) -> String {
    let headings = variant.headings();

    // Minimum width of 3 for readability
    let mut widths: Vec<usize> = headings.iter().map(|h| h.width().max(3)).collect();
    for record in records {
        for (i, value) in record.cells().iter().enumerate() {
            widths[i] = widths[i].max(value.width());
        }
    }

    // Full inner width between the outer pipes
    let inner: usize = widths.iter().map(|w| w + 3).sum::<usize>() - 1;
    let message_width = empty_message.width();
    if records.is_empty() && message_width + 2 > inner {
        widths[0] += message_width + 2 - inner;
    }
    let inner: usize = widths.iter().map(|w| w + 3).sum::<usize>() - 1;

    let mut output = String::new();
    push_border(&mut output, &widths, '-');
    push_row(&mut output, &widths, &headings);
    push_border(&mut output, &widths, '=');

    if records.is_empty() {
        output.push_str("| ");
        output.push_str(empty_message);
        output.push_str(&" ".repeat(inner - message_width - 1));
        output.push_str("|\n");
    } else {
        for record in records {
            push_row(&mut output, &widths, &record.cells());
        }
    }

    push_border(&mut output, &widths, '-');
    output
}

fn push_border(output: &mut String, widths: &[usize], fill: char) {
    output.push('+');
    for w in widths {
        output.extend(std::iter::repeat(fill).take(w + 2));
        output.push('+');
    }
    output.push('\n');
}

fn push_row(output: &mut String, widths: &[usize], cells: &[&str]) {
    output.push('|');
    for (value, width) in cells.iter().zip(widths) {
        let value = value.replace('\n', " ");
        output.push(' ');
        output.push_str(&value);
        output.push_str(&" ".repeat(width - value.width()));
        output.push_str(" |");
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_table() {
        let records = [
            ProductRecord::chemical("Acetone", "67-64-1", "Solvent", "99%"),
            ProductRecord::chemical("Sodium Chloride", "7647-14-5", "Salt", "98%"),
        ];
        let refs: Vec<&ProductRecord> = records.iter().collect();

        let text = to_text(&refs, DatasetVariant::Chemical, "No products found.");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("Product Name"));
        assert!(lines[2].starts_with("+="));
        assert!(lines[3].contains("| Acetone         | 67-64-1"));
        assert!(lines[4].contains("Sodium Chloride"));
        // Every line has the same display width
        assert!(lines.iter().all(|l| l.width() == lines[0].width()));
    }

    #[test]
    fn test_text_empty_message() {
        let text = to_text(&[], DatasetVariant::Catalog, "No products found.");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[3].starts_with("| No products found."));
        assert!(lines.iter().all(|l| l.width() == lines[0].width()));
    }

    #[test]
    fn test_wide_characters_align() {
        let records = [ProductRecord::catalog("試薬瓶", "ガラス", "", "")];
        let refs: Vec<&ProductRecord> = records.iter().collect();
        let text = to_text(&refs, DatasetVariant::Catalog, "");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.iter().all(|l| l.width() == lines[0].width()));
    }
}
