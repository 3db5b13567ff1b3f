//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations of the sales aggregates:
//! - **Bar Chart**: the number of items in each price range
//! - **Pie Chart**: the number of items in each category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a container div and an inline initialization script. The
//! script is inline (rather than in the document head) so that it also runs
//! when the dashboard content is swapped in by HTMX.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisType, Color, Label, Orient, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};
use rand::Rng;

use crate::statistics::{CategoryHistogram, PriceHistogram};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the chart container divs followed by the script that fills them.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[400px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }

        (charts_script(charts))
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Charts follow the system colour scheme and resize with their container.
fn charts_script(charts: &[DashboardChart]) -> Markup {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    new ResizeObserver(() => chart.resize()).observe(chartDom);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                // Keep category names from closing the script element early.
                chart.options.replace("</", "<\\/")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!(script { (PreEscaped(script_content)) })
}

pub(super) fn price_range_chart(month_name: &str, histogram: &PriceHistogram) -> Chart {
    let (labels, counts): (Vec<&str>, Vec<f64>) = histogram
        .buckets()
        .map(|(label, count)| (label, count as f64))
        .unzip();

    Chart::new()
        .title(
            Title::new()
                .text("Bar Chart Stats")
                .subtext(format!("Items per price range in {month_name}")),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("8%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Prices")
                .data(labels),
        )
        .y_axis(Axis::new().type_(AxisType::Value).name("Items"))
        .series(Bar::new().name("Items").data(counts))
}

pub(super) fn category_chart(month_name: &str, histogram: &CategoryHistogram) -> Chart {
    let data: Vec<(f64, &str)> = histogram
        .iter()
        .map(|(category, count)| (count as f64, category))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Pie Chart Stats")
                .subtext(format!("Items per category in {month_name}")),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().orient(Orient::Vertical).left("left").top("15%"))
        .color(random_colors(data.len()))
        .series(
            Pie::new()
                .name("Categories")
                .radius("60%")
                .label(Label::new().show(true).formatter("{b}: {c}"))
                .data(data),
        )
}

/// A random colour for each of `count` pie slices.
fn random_colors(count: usize) -> Vec<Color> {
    let mut rng = rand::thread_rng();

    (0..count)
        .map(|_| {
            let rgb: u32 = rng.gen_range(0..=0xFF_FF_FF);
            Color::from(format!("#{rgb:06x}").as_str())
        })
        .collect()
}
