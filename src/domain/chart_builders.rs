//! The line-chart variants shown by the demo pages.
//!
//! Each builder is a pure function of the rows and returns a fresh
//! [`ChartExample`]: the spec to draw plus the text that explains it. The
//! bodies are kept in sync with [`crate::domain::snippets`], which echoes
//! them back to the reader.

use std::sync::Arc;

use crate::domain::chart::{
    Bind, Chart, ChartSpec, Encoding, Mark, Param, SortOrder, condition, field, value,
};
use crate::domain::snippets;
use crate::domain::stock_row::StockRow;

#[derive(Debug, Clone)]
pub struct ChartExample {
    pub title: &'static str,
    pub notes: Vec<&'static str>,
    pub spec: ChartSpec,
    pub snippet: &'static str,
}

pub fn simple_line(source: &Arc<Vec<StockRow>>) -> ChartExample {
    let chart = Chart::new(source).mark(Mark::line()).encode(
        Encoding::new()
            .x(field("date").temporal())
            .y(field("price").quantitative())
            .color(field("symbol").nominal()),
    );

    ChartExample {
        title: "Simple line chart",
        notes: vec![
            "Mark `date` as temporal; without it the x axis treats dates as plain categories.",
        ],
        spec: chart.to_spec(),
        snippet: snippets::SIMPLE_LINE,
    }
}

pub fn simple_line_data_order(source: &Arc<Vec<StockRow>>) -> ChartExample {
    let chart = Chart::new(source).mark(Mark::line()).encode(
        Encoding::new()
            .x(field("date").temporal())
            .y(field("price").quantitative())
            .color(field("symbol").nominal().sort(SortOrder::DataOrder)),
    );

    ChartExample {
        title: "Legend in data order",
        notes: vec![
            "By default legend entries are sorted alphabetically.",
            "Use `sort(SortOrder::DataOrder)` on the color field to keep the order of the source table.",
        ],
        spec: chart.to_spec(),
        snippet: snippets::SIMPLE_LINE_DATA_ORDER,
    }
}

pub fn legend_selection(source: &Arc<Vec<StockRow>>) -> ChartExample {
    let selection = Param::point("legend").fields(["symbol"]).bind(Bind::Legend);
    let chart = Chart::new(source)
        .mark(Mark::line())
        .encode(
            Encoding::new()
                .x(field("date").temporal())
                .y(field("price").quantitative())
                .color(field("symbol").nominal())
                .opacity(condition(&selection, value(1.0), value(0.1))),
        )
        .add_param(selection);

    ChartExample {
        title: "Select series via legend",
        notes: vec![
            "Click a legend entry to highlight that series; the others fade out.",
            "Shift-click adds more series. Click anywhere else to show every series again.",
        ],
        spec: chart.to_spec(),
        snippet: snippets::LEGEND_SELECTION,
    }
}

pub fn hover_tooltip(source: &Arc<Vec<StockRow>>) -> ChartExample {
    let selection = Param::point("legend").fields(["symbol"]).bind(Bind::Legend);
    let lines = Chart::new(source)
        .mark(Mark::line())
        .encode(
            Encoding::new()
                .x(field("date").temporal())
                .y(field("price").quantitative())
                .color(field("symbol").nominal())
                .opacity(condition(&selection, value(1.0), value(0.1))),
        )
        .add_param(selection);

    // Marker on the data point nearest to the pointer.
    let hover = Param::point("hover")
        .fields(["date"])
        .nearest()
        .on("mouseover")
        .empty(false);
    let points = Chart::new(source)
        .encode(
            Encoding::new()
                .x(field("date").temporal())
                .y(field("price").quantitative())
                .color(field("symbol").nominal()),
        )
        .transform_filter(&hover)
        .mark(Mark::circle().size(50.0));

    // Vertical rule carrying the tooltip.
    let tooltips = Chart::new(source)
        .mark(Mark::rule())
        .encode(
            Encoding::new()
                .x(field("date").temporal())
                .y(field("price").quantitative())
                .opacity(condition(&hover, value(0.1), value(0.0)))
                .tooltip([
                    field("date").temporal().title("date"),
                    field("price").quantitative().title("price"),
                    field("symbol").nominal().title("symbol"),
                ]),
        )
        .add_param(hover);

    let chart = lines.layer([points, tooltips]).interactive();

    ChartExample {
        title: "Hover marker and tooltip",
        notes: vec!["Hover over the chart to see the values of the nearest data point."],
        spec: chart.to_spec(),
        snippet: snippets::HOVER_TOOLTIP,
    }
}
