//! Page controller for a product catalog.
//!
//! [`CatalogPage`] owns everything the page needs: the loaded records, the
//! current filter, the load state and the document tree with its search
//! input, category selector and product table. Input events are methods
//! taking `&mut self`; each one recomputes the filter and re-renders the
//! table body synchronously.
//!
//! # Example
//!
//! ```no_run
//! use prodtable::{CatalogOptions, CatalogPage};
//!
//! let options = CatalogOptions::for_path("products/pro.xlsx");
//! let mut page = CatalogPage::with_query(options, "?category=Solvent");
//! page.load();
//!
//! page.input_search("acet");
//! println!("{}", page.to_html());
//! ```

use crate::dom::Element;
use crate::error::Result;
use crate::filter::Filter;
use crate::loader;
use crate::model::{DatasetVariant, ProductRecord};
use crate::options::CatalogOptions;
use crate::query::QueryParams;
use crate::render;

/// Id of the search text input.
pub const SEARCH_INPUT_ID: &str = "searchInput";

/// Id of the category selector.
pub const CATEGORY_FILTER_ID: &str = "categoryFilter";

/// Id of the product table.
pub const PRODUCTS_TABLE_ID: &str = "productsTable";

/// Where the page is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No dataset loaded yet
    Pending,
    /// Records are available
    Loaded,
    /// The last load failed; the error row is showing
    Failed,
}

/// A product catalog page.
#[derive(Debug)]
pub struct CatalogPage {
    options: CatalogOptions,
    requested: QueryParams,
    records: Vec<ProductRecord>,
    filter: Filter,
    state: LoadState,
    root: Element,
}

impl CatalogPage {
    /// Create a page with no initial query.
    pub fn new(options: CatalogOptions) -> Self {
        Self::with_params(options, QueryParams::default())
    }

    /// Create a page, reading initial filter values from a query string.
    pub fn with_query(options: CatalogOptions, query: &str) -> Self {
        let params =
            QueryParams::parse_with_limits(query, options.max_search_len, options.max_category_len);
        Self::with_params(options, params)
    }

    /// Create a page with already-parsed initial filter values.
    pub fn with_params(options: CatalogOptions, requested: QueryParams) -> Self {
        let root = Self::skeleton(options.variant);
        Self {
            options,
            requested,
            records: Vec::new(),
            filter: Filter::default(),
            state: LoadState::Pending,
            root,
        }
    }

    /// Controls start disabled and the table body empty until a load finishes.
    fn skeleton(variant: DatasetVariant) -> Element {
        let search = Element::new("input")
            .with_attr("type", "search")
            .with_attr("id", SEARCH_INPUT_ID)
            .with_attr("placeholder", "Search products")
            .with_attr("value", "")
            .with_attr("disabled", "");

        let select = render::category_select(CATEGORY_FILTER_ID).with_attr("disabled", "");

        Element::new("div")
            .with_attr("class", "product-catalog")
            .with_child(search)
            .with_child(select)
            .with_child(render::table_skeleton(PRODUCTS_TABLE_ID, variant))
    }

    /// Load the dataset from the configured location.
    ///
    /// Returns `true` if records were loaded. A failure is logged and shown
    /// as the error row; it never propagates.
    pub fn load(&mut self) -> bool {
        let location = self.options.dataset_location();
        let result = loader::load_dataset(&location, &self.options);
        self.finish_load(result)
    }

    /// Load the dataset from in-memory bytes.
    pub fn load_bytes(&mut self, data: &[u8]) -> bool {
        let result = loader::load_bytes(data, &self.options);
        self.finish_load(result)
    }

    /// Asynchronous form of [`CatalogPage::load`].
    #[cfg(feature = "async")]
    pub async fn load_async(&mut self) -> bool {
        let location = self.options.dataset_location();
        let result = loader::load_dataset_async(&location, &self.options).await;
        self.finish_load(result)
    }

    /// Install the outcome of a load.
    ///
    /// On success the record list is replaced wholesale, the controls are
    /// enabled, categories are populated and the initial query is applied.
    pub fn finish_load(&mut self, result: Result<Vec<ProductRecord>>) -> bool {
        match result {
            Ok(records) => {
                self.records = records;
                self.state = LoadState::Loaded;
                self.filter = Filter::default();
                self.reset_controls(true);
                self.populate_categories();
                self.apply_requested();
                self.refresh();
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "error loading products");
                self.records.clear();
                self.state = LoadState::Failed;
                self.filter = Filter::default();
                self.reset_controls(false);
                if let Some(body) = Self::body_mut(&mut self.root) {
                    render::render_message(body, &self.options.error_message);
                }
                false
            }
        }
    }

    /// Text input event: replace the search text and re-filter.
    pub fn input_search(&mut self, text: &str) {
        self.filter.set_search(text);
        if let Some(input) = self.root.find_by_id_mut(SEARCH_INPUT_ID) {
            input.set_attr("value", text);
        }
        self.refresh();
    }

    /// Category change event: select `value` and re-filter.
    ///
    /// Like a native selector, a value with no matching option selects
    /// nothing, which is the same as "all categories".
    pub fn change_category(&mut self, value: &str) {
        let selected = if self.has_category_option(value) {
            value
        } else {
            ""
        };
        self.select_option(selected);
        self.filter.set_category(selected);
        self.refresh();
    }

    /// Recompute the visible records and re-render the table body.
    pub fn refresh(&mut self) {
        let visible = self.filter.apply(&self.records);
        tracing::debug!(
            search = self.filter.search(),
            category = self.filter.category(),
            visible = visible.len(),
            total = self.records.len(),
            "filter recomputed"
        );
        if let Some(body) = Self::body_mut(&mut self.root) {
            render::render_rows(body, &visible, &self.options.empty_message);
        }
    }

    fn populate_categories(&mut self) {
        if let Some(select) = self.root.find_by_id_mut(CATEGORY_FILTER_ID) {
            render::populate_category_options(select, &self.records);
        }
    }

    /// Apply the initial query: the search text always, the category only
    /// when it names a populated option.
    fn apply_requested(&mut self) {
        if let Some(search) = self.requested.search.clone() {
            self.filter.set_search(search.as_str());
            if let Some(input) = self.root.find_by_id_mut(SEARCH_INPUT_ID) {
                input.set_attr("value", search);
            }
        }

        if let Some(category) = self.requested.category.clone() {
            if self.has_category_option(&category) {
                self.select_option(&category);
                self.filter.set_category(category);
            } else {
                tracing::debug!(category = %category, "requested category has no matching option");
            }
        }
    }

    /// Clear input values and category options; enable or disable the controls.
    fn reset_controls(&mut self, enabled: bool) {
        let mut fresh_select = render::category_select(CATEGORY_FILTER_ID);
        if let Some(input) = self.root.find_by_id_mut(SEARCH_INPUT_ID) {
            input.set_attr("value", "");
            toggle_disabled(input, enabled);
        }
        if let Some(select) = self.root.find_by_id_mut(CATEGORY_FILTER_ID) {
            toggle_disabled(&mut fresh_select, enabled);
            *select = fresh_select;
        }
    }

    fn has_category_option(&self, value: &str) -> bool {
        value.is_empty()
            || self
                .category_select()
                .is_some_and(|select| select.child_elements().any(|o| o.attr("value") == Some(value)))
    }

    fn select_option(&mut self, value: &str) {
        if let Some(select) = self.root.find_by_id_mut(CATEGORY_FILTER_ID) {
            for option in select.child_elements_mut() {
                if option.attr("value") == Some(value) && !value.is_empty() {
                    option.set_attr("selected", "");
                } else {
                    option.remove_attr("selected");
                }
            }
        }
    }

    fn category_select(&self) -> Option<&Element> {
        self.root.find_by_id(CATEGORY_FILTER_ID)
    }

    fn body_mut(root: &mut Element) -> Option<&mut Element> {
        root.find_by_id_mut(PRODUCTS_TABLE_ID)
            .and_then(|table| table.child_mut("tbody"))
    }

    /// The loaded records, in dataset order.
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Records passing the current filter.
    pub fn visible_records(&self) -> Vec<&ProductRecord> {
        self.filter.apply(&self.records)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Category option values, excluding the leading "all" option.
    pub fn category_options(&self) -> Vec<&str> {
        self.category_select()
            .map(|select| {
                select
                    .child_elements()
                    .filter_map(|o| o.attr("value"))
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The category the selector currently shows; empty for "all".
    pub fn selected_category(&self) -> &str {
        self.filter.category()
    }

    /// Current value of the search input.
    pub fn search_value(&self) -> &str {
        self.root
            .find_by_id(SEARCH_INPUT_ID)
            .and_then(|input| input.attr("value"))
            .unwrap_or("")
    }

    /// The table body element.
    pub fn table_body(&self) -> Option<&Element> {
        self.root
            .find_by_id(PRODUCTS_TABLE_ID)
            .and_then(|table| table.child("tbody"))
    }

    /// The whole page tree.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize the page tree to HTML.
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }
}

fn toggle_disabled(element: &mut Element, enabled: bool) {
    if enabled {
        element.remove_attr("disabled");
    } else {
        element.set_attr("disabled", "");
    }
}
