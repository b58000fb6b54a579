//! Table body and category selector rendering.

use crate::dom::Element;
use crate::model::{DatasetVariant, ProductRecord};

/// Row text shown when no record passes the filter.
pub const NO_PRODUCTS_MESSAGE: &str = "No products found.";

/// Row text shown when the dataset fails to load.
pub const LOAD_ERROR_MESSAGE: &str = "Unable to load products. Please try again later.";

/// Label of the leading "all categories" option.
const ALL_CATEGORIES_LABEL: &str = "All categories";

/// A `<table>` with the variant's headings and an empty `<tbody>`.
pub fn table_skeleton(id: &'static str, variant: DatasetVariant) -> Element {
    let mut header_row = Element::new("tr");
    for heading in variant.headings() {
        header_row.append(Element::new("th").with_text(heading));
    }

    Element::new("table")
        .with_attr("id", id)
        .with_child(Element::new("thead").with_child(header_row))
        .with_child(Element::new("tbody"))
}

/// A single full-width row carrying `text`.
pub fn message_row(text: &str) -> Element {
    Element::new("tr").with_attr("class", "message").with_child(
        Element::new("td")
            .with_attr("colspan", DatasetVariant::COLUMN_COUNT.to_string())
            .with_attr("style", "text-align:center;")
            .with_text(text),
    )
}

/// Replace the body's rows with one row per record.
///
/// An empty record list renders a single `empty_message` row instead of an
/// empty body.
pub fn render_rows(body: &mut Element, records: &[&ProductRecord], empty_message: &str) {
    body.clear();

    if records.is_empty() {
        body.append(message_row(empty_message));
        return;
    }

    for record in records {
        let mut tr = Element::new("tr");
        for value in record.cells() {
            tr.append(Element::new("td").with_text(value));
        }
        body.append(tr);
    }
}

/// Replace the body's rows with a single message row.
pub fn render_message(body: &mut Element, message: &str) {
    body.clear();
    body.append(message_row(message));
}

/// Distinct non-empty categories in first-occurrence order.
///
/// The empty category is left out: its option would duplicate the
/// leading "all categories" option, whose value is also empty.
pub fn distinct_categories(records: &[ProductRecord]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .map(ProductRecord::category)
        .filter(|category| !category.is_empty() && seen.insert(*category))
        .collect()
}

/// A `<select>` holding only the "all categories" option.
pub fn category_select(id: &'static str) -> Element {
    Element::new("select").with_attr("id", id).with_child(
        Element::new("option")
            .with_attr("value", "")
            .with_text(ALL_CATEGORIES_LABEL),
    )
}

/// Append one option per distinct category after the existing options.
///
/// Returns the categories that were added.
pub fn populate_category_options<'a>(
    select: &mut Element,
    records: &'a [ProductRecord],
) -> Vec<&'a str> {
    let categories = distinct_categories(records);
    for category in &categories {
        select.append(
            Element::new("option")
                .with_attr("value", *category)
                .with_text(*category),
        );
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_rows(body: &Element) -> Vec<&Element> {
        body.child_elements().collect()
    }

    #[test]
    fn test_rows_follow_variant_order() {
        let records = [ProductRecord::chemical("Acetone", "67-64-1", "Solvent", "99%")];
        let refs: Vec<&ProductRecord> = records.iter().collect();
        let mut body = Element::new("tbody");

        render_rows(&mut body, &refs, NO_PRODUCTS_MESSAGE);

        assert_eq!(
            body.to_html(),
            "<tbody><tr><td>Acetone</td><td>67-64-1</td><td>Solvent</td><td>99%</td></tr></tbody>"
        );
    }

    #[test]
    fn test_empty_renders_one_message_row() {
        let mut body = Element::new("tbody");
        body.append(Element::new("tr"));
        body.append(Element::new("tr"));

        render_rows(&mut body, &[], NO_PRODUCTS_MESSAGE);

        let rows = body_rows(&body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text_content(), "No products found.");
        let cell = rows[0].child("td").unwrap();
        assert_eq!(cell.attr("colspan"), Some("4"));
    }

    #[test]
    fn test_untrusted_cells_are_text() {
        let records = [ProductRecord::catalog("<b>x</b>", "c", "\"quoted\"", "&")];
        let refs: Vec<&ProductRecord> = records.iter().collect();
        let mut body = Element::new("tbody");

        render_rows(&mut body, &refs, NO_PRODUCTS_MESSAGE);

        let html = body.to_html();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains("&quot;quoted&quot;"));
        assert!(html.contains("<td>&amp;</td>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_distinct_categories() {
        let records = vec![
            ProductRecord::chemical("A", "", "Solvent", ""),
            ProductRecord::chemical("B", "", "Salt", ""),
            ProductRecord::chemical("C", "", "Solvent", ""),
            ProductRecord::chemical("D", "", "Acid", ""),
            ProductRecord::chemical("E", "", "Salt", ""),
            ProductRecord::chemical("F", "", "", ""),
        ];
        assert_eq!(distinct_categories(&records), vec!["Solvent", "Salt", "Acid"]);

        let mut select = category_select("categoryFilter");
        let added = populate_category_options(&mut select, &records);
        assert_eq!(added.len(), 3);
        assert_eq!(select.child_elements().count(), 4);
    }

    #[test]
    fn test_table_skeleton_headings() {
        let table = table_skeleton("productsTable", DatasetVariant::Chemical);
        assert_eq!(
            table.child("thead").unwrap().text_content(),
            "Product NameCAS No.CategoryPurity"
        );
        assert!(table.child("tbody").unwrap().children().is_empty());
    }
}
