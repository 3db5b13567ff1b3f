//! Table views for dashboard data display.
//!
//! Provides the transactions table with its page controls, the month and
//! search controls, and the statistics block.

use maud::{Markup, html};
use serde::Serialize;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
    month::MONTH_NAMES,
    pagination::PageRequest,
    product::{Product, ProductFilter},
    statistics::SalesSummary,
};

/// Re-fetch shortly after the user stops typing, or when the box is cleared.
pub(super) const LIVE_SEARCH_TRIGGER: &str = "input changed delay:300ms, search";

/// The query string of a dashboard URL.
#[derive(Serialize)]
struct DashboardLink<'a> {
    page: u64,
    month: &'a str,
    search: &'a str,
}

/// The dashboard URL for `page` of the products matching `filter`.
pub(super) fn dashboard_url(page: u64, filter: &ProductFilter) -> String {
    let link = DashboardLink {
        page,
        month: filter.month_name(),
        search: filter.search(),
    };

    match serde_urlencoded::to_string(&link) {
        Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_VIEW),
        Err(error) => {
            tracing::error!("could not encode dashboard query {page}: {error}");
            endpoints::DASHBOARD_VIEW.to_owned()
        }
    }
}

/// Renders the month selector and the search box.
///
/// Changing the month keeps the current page and search term. Typing in the
/// search box keeps the current page and month. Submitting the search box
/// goes back to the first page for the selected month.
pub(super) fn filter_controls(filter: &ProductFilter, page: PageRequest) -> Markup {
    let month_vals = serde_json::json!({
        "page": page.page(),
        "search": filter.search(),
    })
    .to_string();
    let search_vals = serde_json::json!({
        "page": page.page(),
        "month": filter.month_name(),
    })
    .to_string();

    html! {
        div class="w-full flex flex-col md:flex-row md:items-end gap-4 mb-6"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Select Month" }

                select
                    id="month"
                    name="month"
                    hx-get=(endpoints::DASHBOARD_VIEW)
                    hx-trigger="change"
                    hx-vals=(month_vals)
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for name in MONTH_NAMES {
                        option value=(name) selected[name == filter.month_name()] { (name) }
                    }
                }
            }

            form
                hx-get=(endpoints::DASHBOARD_VIEW)
                class="flex grow items-end gap-2"
            {
                input type="hidden" name="page" value="1";
                input type="hidden" name="month" value=(filter.month_name());

                div class="grow"
                {
                    label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                    input
                        id="search"
                        name="search"
                        type="search"
                        value=(filter.search())
                        hx-get=(endpoints::DASHBOARD_VIEW)
                        hx-trigger=(LIVE_SEARCH_TRIGGER)
                        hx-vals=(search_vals)
                        placeholder="Search transactions by title, description, or price..."
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Search" }
            }
        }
    }
}

/// Renders one page of products with Previous/Next links.
pub(super) fn transactions_table(
    products: &[Product],
    filter: &ProductFilter,
    page: PageRequest,
) -> Markup {
    let previous_url = dashboard_url(page.previous_page(), filter);
    let next_url = dashboard_url(page.next_page(), filter);

    html! {
        section id="transactions" class="w-full mb-8"
        {
            h2 class="text-xl font-semibold mb-4 text-center" { "Transactions" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Sold" }
                        }
                    }

                    tbody
                    {
                        @for product in products {
                            tr class=(TABLE_ROW_STYLE) data-product-id=(product.id)
                            {
                                td class=(TABLE_CELL_STYLE) { (product.id) }
                                td class=(TABLE_CELL_STYLE) { (product.title) }
                                td class=(TABLE_CELL_STYLE) { (product.description) }
                                td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} {
                                    (format_currency(product.price))
                                }
                                td class=(TABLE_CELL_STYLE) { (product.category) }
                                td class=(TABLE_CELL_STYLE) {
                                    @if product.sold { "Yes" } @else { "No" }
                                }
                            }
                        }

                        @if products.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="6" class={(TABLE_CELL_STYLE) " text-center"} {
                                    "No transactions found."
                                }
                            }
                        }
                    }
                }
            }

            nav class="flex justify-between items-center mt-4" aria-label="Pagination"
            {
                a id="previous-page" href=(previous_url) hx-get=(previous_url) class=(LINK_STYLE) {
                    "Previous"
                }

                span { "Page " (page.page()) }

                a id="next-page" href=(next_url) hx-get=(next_url) class=(LINK_STYLE) {
                    "Next"
                }
            }
        }
    }
}

/// Renders the total sales and sold/unsold counts for the selected month.
pub(super) fn statistics_block(month_name: &str, summary: &SalesSummary) -> Markup {
    html! {
        section id="statistics" class="w-full max-w-md mb-8 p-6 bg-white dark:bg-gray-800 rounded-lg shadow"
        {
            h2 class="text-xl font-semibold mb-4" { "Statistics for " (month_name) }

            dl class="grid grid-cols-2 gap-2"
            {
                dt { "Total Sales" }
                dd id="total-sales" class="text-right" { (format_currency(summary.total_sales)) }

                dt { "Sold Items" }
                dd id="sold-items" class="text-right" { (summary.sold_items) }

                dt { "Unsold Items" }
                dd id="unsold-items" class="text-right" { (summary.unsold_items) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::{
        pagination::{PageRequest, PaginationConfig},
        product::ProductFilter,
    };

    use super::dashboard_url;

    #[test]
    fn url_encodes_search() {
        let filter = ProductFilter::new(Month::April, "men's & women's");

        let url = dashboard_url(3, &filter);

        assert_eq!(
            url,
            "/dashboard?page=3&month=April&search=men%27s+%26+women%27s"
        );
    }

    #[test]
    fn url_keeps_empty_search() {
        let filter = ProductFilter::new(Month::March, "");
        let page = PageRequest::new(None, None, &PaginationConfig::default()).unwrap();

        let url = dashboard_url(page.previous_page(), &filter);

        assert_eq!(url, "/dashboard?page=1&month=March&search=");
    }
}
