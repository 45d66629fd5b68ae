//! Source text echoed next to each rendered chart.
//!
//! These mirror the builder bodies in [`crate::domain::chart_builders`] and
//! the dataset wiring in the CLI. Keep them in sync when either changes.

pub const RUN_DEMO: &str = r#"cargo run --release -- serve --config linedeck.ini"#;

pub const LOAD_DATASET: &str = r#"use linedeck::adapters::csv_adapter::CsvAdapter;
use linedeck::domain::dataset::{DatasetProvider, default_cutoff};

// Loaded once, then shared by every page render.
let provider = DatasetProvider::new(
    Box::new(CsvAdapter::new("data/stocks.csv")),
    default_cutoff(), // keeps rows after 2004-01-01
);
let source = provider.rows()?;"#;

pub const SIMPLE_LINE: &str = r#"let chart = Chart::new(source).mark(Mark::line()).encode(
    Encoding::new()
        .x(field("date").temporal())
        .y(field("price").quantitative())
        .color(field("symbol").nominal()),
);"#;

pub const SIMPLE_LINE_DATA_ORDER: &str = r#"let chart = Chart::new(source).mark(Mark::line()).encode(
    Encoding::new()
        .x(field("date").temporal())
        .y(field("price").quantitative())
        .color(field("symbol").nominal().sort(SortOrder::DataOrder)),
);"#;

pub const LEGEND_SELECTION: &str = r#"let selection = Param::point("legend").fields(["symbol"]).bind(Bind::Legend);
let chart = Chart::new(source)
    .mark(Mark::line())
    .encode(
        Encoding::new()
            .x(field("date").temporal())
            .y(field("price").quantitative())
            .color(field("symbol").nominal())
            .opacity(condition(&selection, value(1.0), value(0.1))),
    )
    .add_param(selection);"#;

pub const HOVER_TOOLTIP: &str = r#"let selection = Param::point("legend").fields(["symbol"]).bind(Bind::Legend);
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

let chart = lines.layer([points, tooltips]).interactive();"#;
