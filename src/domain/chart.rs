//! Declarative chart specifications.
//!
//! A [`Chart`] is built fluently (mark, encodings, selection params, filter
//! transforms, layers) and turned into a [`ChartSpec`], which serializes to a
//! Vega-Lite v5 document with the rows inlined as `data.values`.

use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::domain::stock_row::StockRow;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Line,
    Circle,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl Mark {
    pub fn line() -> Self {
        Self {
            kind: MarkType::Line,
            size: None,
        }
    }

    pub fn circle() -> Self {
        Self {
            kind: MarkType::Circle,
            size: None,
        }
    }

    pub fn rule() -> Self {
        Self {
            kind: MarkType::Rule,
            size: None,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Temporal,
    Quantitative,
    Nominal,
}

/// Legend/axis ordering. `DataOrder` serializes as `null`, which keeps
/// values in the order they appear in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
    DataOrder,
}

impl Serialize for SortOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SortOrder::Ascending => serializer.serialize_str("ascending"),
            SortOrder::Descending => serializer.serialize_str("descending"),
            SortOrder::DataOrder => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

/// Start a field definition; the type defaults to nominal.
pub fn field(name: &str) -> FieldDef {
    FieldDef {
        field: name.to_string(),
        kind: FieldType::Nominal,
        title: None,
        sort: None,
    }
}

impl FieldDef {
    pub fn temporal(mut self) -> Self {
        self.kind = FieldType::Temporal;
        self
    }

    pub fn quantitative(mut self) -> Self {
        self.kind = FieldType::Quantitative;
        self
    }

    pub fn nominal(mut self) -> Self {
        self.kind = FieldType::Nominal;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDef {
    pub value: f64,
}

pub fn value(v: f64) -> ValueDef {
    ValueDef { value: v }
}

/// Reference to a named selection param, as used in conditions and filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamPredicate {
    pub param: String,
    /// Only written when the selection should match nothing while empty.
    #[serde(skip_serializing_if = "is_true")]
    pub empty: bool,
}

fn is_true(b: &bool) -> bool {
    *b
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalValue {
    pub condition: ConditionArm,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionArm {
    #[serde(flatten)]
    pub test: ParamPredicate,
    pub value: f64,
}

/// `if_true` while `param` is selected, `if_false` otherwise.
pub fn condition(param: &Param, if_true: ValueDef, if_false: ValueDef) -> Channel {
    Channel::Conditional(ConditionalValue {
        condition: ConditionArm {
            test: param.predicate(),
            value: if_true.value,
        },
        value: if_false.value,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Channel {
    Field(FieldDef),
    Value(ValueDef),
    Conditional(ConditionalValue),
}

impl From<FieldDef> for Channel {
    fn from(def: FieldDef) -> Self {
        Channel::Field(def)
    }
}

impl From<ValueDef> for Channel {
    fn from(def: ValueDef) -> Self {
        Channel::Value(def)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Channel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<FieldDef>,
}

impl Encoding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, channel: impl Into<Channel>) -> Self {
        self.x = Some(channel.into());
        self
    }

    pub fn y(mut self, channel: impl Into<Channel>) -> Self {
        self.y = Some(channel.into());
        self
    }

    pub fn color(mut self, channel: impl Into<Channel>) -> Self {
        self.color = Some(channel.into());
        self
    }

    pub fn opacity(mut self, channel: impl Into<Channel>) -> Self {
        self.opacity = Some(channel.into());
        self
    }

    pub fn tooltip(mut self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.tooltip = fields.into_iter().collect();
        self
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    Point,
    Interval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bind {
    Legend,
    Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    #[serde(rename = "type")]
    pub kind: SelectionType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nearest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<String>,
}

/// Named interactive selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub select: Selection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<Bind>,
    /// Whether an empty selection matches everything. Copied into every
    /// predicate that references this param rather than serialized here.
    #[serde(skip)]
    pub empty: bool,
}

impl Param {
    fn new(name: &str, kind: SelectionType) -> Self {
        Self {
            name: name.to_string(),
            select: Selection {
                kind,
                fields: Vec::new(),
                nearest: false,
                on: None,
            },
            bind: None,
            empty: true,
        }
    }

    pub fn point(name: &str) -> Self {
        Self::new(name, SelectionType::Point)
    }

    pub fn interval(name: &str) -> Self {
        Self::new(name, SelectionType::Interval)
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn bind(mut self, bind: Bind) -> Self {
        self.bind = Some(bind);
        self
    }

    pub fn nearest(mut self) -> Self {
        self.select.nearest = true;
        self
    }

    pub fn on(mut self, event: &str) -> Self {
        self.select.on = Some(event.to_string());
        self
    }

    pub fn empty(mut self, matches_all: bool) -> Self {
        self.empty = matches_all;
        self
    }

    pub fn predicate(&self) -> ParamPredicate {
        ParamPredicate {
            param: self.name.clone(),
            empty: self.empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
    pub filter: ParamPredicate,
}

/// A single view, or the shared top level of a layered chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct View {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Mark>,
    #[serde(skip_serializing_if = "Encoding::is_empty")]
    pub encoding: Encoding,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

#[derive(Debug, Clone)]
pub struct Chart {
    data: Arc<Vec<StockRow>>,
    view: View,
    layer: Vec<View>,
}

impl Chart {
    pub fn new(data: &Arc<Vec<StockRow>>) -> Self {
        Self {
            data: Arc::clone(data),
            view: View::default(),
            layer: Vec::new(),
        }
    }

    pub fn mark(mut self, mark: Mark) -> Self {
        self.view.mark = Some(mark);
        self
    }

    pub fn encode(mut self, encoding: Encoding) -> Self {
        self.view.encoding = encoding;
        self
    }

    pub fn add_param(mut self, param: Param) -> Self {
        self.view.params.push(param);
        self
    }

    pub fn transform_filter(mut self, param: &Param) -> Self {
        self.view.transform.push(Transform {
            filter: param.predicate(),
        });
        self
    }

    /// Stack `others` on top of this chart. All layers share this chart's data.
    pub fn layer(self, others: impl IntoIterator<Item = Chart>) -> Self {
        let data = Arc::clone(&self.data);
        let mut layers = self.into_layers();
        for other in others {
            layers.extend(other.into_layers());
        }
        Self {
            data,
            view: View::default(),
            layer: layers,
        }
    }

    /// Pan and zoom by binding an interval selection to the scales.
    pub fn interactive(mut self) -> Self {
        let grid = Param::interval("grid").bind(Bind::Scales);
        match self.layer.first_mut() {
            Some(first) => first.params.push(grid),
            None => self.view.params.push(grid),
        }
        self
    }

    pub fn is_layered(&self) -> bool {
        !self.layer.is_empty()
    }

    pub fn to_spec(&self) -> ChartSpec {
        ChartSpec {
            schema: VEGA_LITE_SCHEMA,
            data: InlineData {
                values: Arc::clone(&self.data),
            },
            width: "container",
            view: self.view.clone(),
            layer: self.layer.clone(),
        }
    }

    fn into_layers(self) -> Vec<View> {
        if self.layer.is_empty() {
            vec![self.view]
        } else {
            self.layer
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineData {
    pub values: Arc<Vec<StockRow>>,
}

/// Serializable Vega-Lite document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub data: InlineData,
    pub width: &'static str,
    #[serde(flatten)]
    pub view: View,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layer: Vec<View>,
}

impl ChartSpec {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Every data field name the spec refers to, in encodings, tooltips
    /// and selection fields, sorted and deduplicated.
    pub fn referenced_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        for view in std::iter::once(&self.view).chain(self.layer.iter()) {
            collect_view_fields(view, &mut fields);
        }
        fields.sort();
        fields.dedup();
        fields
    }

    /// Names of every selection param declared anywhere in the spec.
    pub fn param_names(&self) -> Vec<String> {
        std::iter::once(&self.view)
            .chain(self.layer.iter())
            .flat_map(|v| v.params.iter().map(|p| p.name.clone()))
            .collect()
    }
}

fn collect_view_fields(view: &View, out: &mut Vec<String>) {
    let enc = &view.encoding;
    for channel in [&enc.x, &enc.y, &enc.color, &enc.opacity].into_iter().flatten() {
        if let Channel::Field(def) = channel {
            out.push(def.field.clone());
        }
    }
    out.extend(enc.tooltip.iter().map(|t| t.field.clone()));
    for param in &view.params {
        out.extend(param.select.fields.iter().cloned());
    }
}
