//! Presenter Descriptions Module
//! Declarative layer, view, tooltip and bar chart descriptions handed to a
//! rendering host. No aggregation happens here.

use crate::config::{DashboardConfig, MapStyle};
use crate::data::{Incident, IncidentTable};
use crate::stats::StateSummary;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

pub const TOOLTIP_TEMPLATE: &str = "<div>Shooting at {city_or_county}, {state} on<br>{date}<br>{n_killed} killed, {n_injured} injured</div>";

/// One point of the scatter layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub position: [f64; 2],
    pub city_or_county: String,
    pub state: String,
    pub date: String,
    pub n_killed: u64,
    pub n_injured: u64,
}

impl From<&Incident> for ScatterPoint {
    fn from(incident: &Incident) -> Self {
        Self {
            position: incident.position(),
            city_or_county: incident.city_or_county.clone(),
            state: incident.state.clone(),
            date: incident.date.clone(),
            n_killed: incident.n_killed,
            n_injured: incident.n_injured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterplotLayer {
    #[serde(rename = "@@type")]
    pub layer_type: &'static str,
    pub data: Vec<ScatterPoint>,
    pub get_position: &'static str,
    pub get_fill_color: [u8; 4],
    pub get_radius: f64,
    pub pickable: bool,
}

impl ScatterplotLayer {
    pub fn new(incidents: &IncidentTable, style: &MapStyle) -> Self {
        Self {
            layer_type: "ScatterplotLayer",
            data: incidents.par_iter().map(ScatterPoint::from).collect(),
            get_position: "position",
            get_fill_color: style.fill_color,
            get_radius: style.radius_m,
            pickable: true,
        }
    }
}

/// Camera over the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl ViewState {
    /// Centered on the mean coordinate; `None` for an empty table.
    pub fn centered_on(incidents: &IncidentTable, style: &MapStyle) -> Option<Self> {
        if incidents.is_empty() {
            return None;
        }

        let latitudes: Vec<f64> = incidents.par_iter().map(|i| i.latitude).collect();
        let longitudes: Vec<f64> = incidents.par_iter().map(|i| i.longitude).collect();

        Some(Self {
            latitude: latitudes.mean(),
            longitude: longitudes.mean(),
            zoom: style.zoom,
            pitch: style.pitch,
        })
    }

    /// Degrees of (longitude, latitude) visible in a viewport of the given
    /// pixel size, using 256px web-map tiles.
    pub fn span(&self, width_px: f64, height_px: f64) -> (f64, f64) {
        let degrees_per_px = 360.0 / (256.0 * 2f64.powf(self.zoom));
        (width_px * degrees_per_px, height_px * degrees_per_px)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub html: String,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            html: TOOLTIP_TEMPLATE.to_string(),
        }
    }
}

impl Tooltip {
    /// Fill the template for one incident, with HTML markup turned into plain lines.
    pub fn render(&self, incident: &Incident) -> String {
        let markup = self
            .html
            .replace("<br>", "\n")
            .replace("<div>", "")
            .replace("</div>", "");

        // Single pass so field values are never expanded again
        let mut out = String::with_capacity(markup.len());
        let mut rest = markup.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            let Some(close) = tail.find('}') else {
                rest = tail;
                break;
            };
            match Self::field(incident, &tail[1..close]) {
                Some(value) => out.push_str(&value),
                None => out.push_str(&tail[..=close]),
            }
            rest = &tail[close + 1..];
        }
        out.push_str(rest);
        out
    }

    fn field(incident: &Incident, name: &str) -> Option<String> {
        let value = match name {
            "city_or_county" => incident.city_or_county.clone(),
            "state" => incident.state.clone(),
            "date" => incident.date.clone(),
            "n_killed" => incident.n_killed.to_string(),
            "n_injured" => incident.n_injured.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// Layer, camera and tooltip for the incident map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSpec {
    pub layers: Vec<ScatterplotLayer>,
    pub initial_view_state: ViewState,
    pub tooltip: Tooltip,
}

impl DeckSpec {
    pub fn new(incidents: &IncidentTable, style: &MapStyle) -> Self {
        let initial_view_state = ViewState::centered_on(incidents, style).unwrap_or(ViewState {
            latitude: 0.0,
            longitude: 0.0,
            zoom: style.zoom,
            pitch: style.pitch,
        });

        Self {
            layers: vec![ScatterplotLayer::new(incidents, style)],
            initial_view_state,
            tooltip: Tooltip::default(),
        }
    }
}

/// Which count a long-format chart row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "# Killed")]
    Killed,
    #[serde(rename = "# Injured")]
    Injured,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Killed, Category::Injured];

    pub fn label(self) -> &'static str {
        match self {
            Category::Killed => "# Killed",
            Category::Injured => "# Injured",
        }
    }
}

/// One bar segment: a state's count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Count")]
    pub count: u64,
}

/// Stack summaries into long format, two rows per state.
pub fn fold_summaries(summaries: &[StateSummary]) -> Vec<ChartRow> {
    summaries
        .iter()
        .flat_map(|s| {
            Category::ALL.into_iter().map(move |category| ChartRow {
                state: s.state.clone(),
                category,
                count: match category {
                    Category::Killed => s.total_killed,
                    Category::Injured => s.total_injured,
                },
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldEncoding {
    pub field: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
}

impl FieldEncoding {
    fn new(field: &'static str, kind: &'static str) -> Self {
        Self {
            field,
            kind,
            title: field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipField {
    pub field: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEncoding {
    pub x: FieldEncoding,
    pub y: FieldEncoding,
    pub color: FieldEncoding,
    pub tooltip: Vec<TooltipField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub values: Vec<ChartRow>,
}

/// Stacked bar chart of killed and injured per state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub data: ChartData,
    pub mark: &'static str,
    pub encoding: BarEncoding,
    pub width: u32,
    pub height: u32,
}

impl BarChartSpec {
    pub fn new(summaries: &[StateSummary], config: &DashboardConfig) -> Self {
        Self {
            data: ChartData {
                values: fold_summaries(summaries),
            },
            mark: "bar",
            encoding: BarEncoding {
                x: FieldEncoding::new("State", "ordinal"),
                y: FieldEncoding::new("Count", "quantitative"),
                color: FieldEncoding::new("Category", "nominal"),
                tooltip: vec![
                    TooltipField {
                        field: "State",
                        kind: "nominal",
                    },
                    TooltipField {
                        field: "Category",
                        kind: "nominal",
                    },
                    TooltipField {
                        field: "Count",
                        kind: "quantitative",
                    },
                ],
            },
            width: config.chart_width,
            height: config.chart_height,
        }
    }

    /// States along the x axis, in data order.
    /// Distinct states in axis order. An ordinal axis sorts its values.
    pub fn states(&self) -> Vec<&str> {
        let mut states: Vec<&str> = self.data.values.iter().map(|row| row.state.as_str()).collect();
        states.sort_unstable();
        states.dedup();
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::incident;
    use pretty_assertions::assert_eq;

    fn table(points: &[(f64, f64)]) -> IncidentTable {
        points
            .iter()
            .map(|&(lat, lon)| Incident {
                latitude: lat,
                longitude: lon,
                ..incident("Ohio", 0, 0)
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn view_centers_on_mean_coordinate() {
        let incidents = table(&[(40.0, -80.0), (42.0, -90.0), (38.0, -100.0)]);
        let view = ViewState::centered_on(&incidents, &MapStyle::default()).unwrap();

        assert!((view.latitude - 40.0).abs() < 1e-9);
        assert!((view.longitude - -90.0).abs() < 1e-9);
        assert_eq!(view.zoom, 4.0);
        assert_eq!(view.pitch, 0.0);
    }

    #[test]
    fn empty_table_has_no_center() {
        let incidents = IncidentTable::default();
        assert_eq!(ViewState::centered_on(&incidents, &MapStyle::default()), None);

        let deck = DeckSpec::new(&incidents, &MapStyle::default());
        assert_eq!(deck.initial_view_state.latitude, 0.0);
        assert!(deck.layers[0].data.is_empty());
    }

    #[test]
    fn layer_positions_are_longitude_first() {
        let incidents = table(&[(40.5, -79.5)]);
        let layer = ScatterplotLayer::new(&incidents, &MapStyle::default());

        assert_eq!(layer.data[0].position, [-79.5, 40.5]);
        assert_eq!(layer.get_fill_color, [255, 0, 0, 160]);
        assert_eq!(layer.get_radius, 500.0);
        assert!(layer.pickable);
    }

    #[test]
    fn tooltip_interpolates_incident_fields() {
        let incident = Incident {
            city_or_county: "Mckeesport".to_string(),
            state: "Pennsylvania".to_string(),
            date: "01/01/2013".to_string(),
            ..incident("Pennsylvania", 0, 4)
        };
        assert_eq!(
            Tooltip::default().render(&incident),
            "Shooting at Mckeesport, Pennsylvania on\n01/01/2013\n0 killed, 4 injured"
        );
    }

    #[test]
    fn tooltip_does_not_expand_placeholders_inside_values() {
        let incident = Incident {
            city_or_county: "{date}".to_string(),
            date: "03/04/2015".to_string(),
            ..incident("{state}", 2, 1)
        };
        assert_eq!(
            Tooltip::default().render(&incident),
            "Shooting at {date}, {state} on\n03/04/2015\n2 killed, 1 injured"
        );
    }

    #[test]
    fn unknown_placeholders_are_left_as_is() {
        let tooltip = Tooltip {
            html: "{weather} in {state} {".to_string(),
        };
        assert_eq!(tooltip.render(&incident("Ohio", 0, 0)), "{weather} in Ohio {");
    }

    #[test]
    fn chart_states_are_in_axis_order() {
        let spec = BarChartSpec::new(
            &[
                StateSummary::new("Texas", 1, 1),
                StateSummary::new("Alabama", 2, 0),
                StateSummary::new("Ohio", 0, 3),
            ],
            &DashboardConfig::default(),
        );
        assert_eq!(spec.states(), vec!["Alabama", "Ohio", "Texas"]);
        assert_eq!(spec.data.values[0].state, "Texas");
    }

    #[test]
    fn fold_emits_killed_then_injured_per_state() {
        let rows = fold_summaries(&[StateSummary::new("CA", 5, 1), StateSummary::new("TX", 2, 7)]);
        assert_eq!(
            rows,
            vec![
                ChartRow { state: "CA".into(), category: Category::Killed, count: 5 },
                ChartRow { state: "CA".into(), category: Category::Injured, count: 1 },
                ChartRow { state: "TX".into(), category: Category::Killed, count: 2 },
                ChartRow { state: "TX".into(), category: Category::Injured, count: 7 },
            ]
        );
    }

    #[test]
    fn bar_chart_serializes_with_column_titles() {
        let spec = BarChartSpec::new(&[StateSummary::new("CA", 5, 1)], &DashboardConfig::default());
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["mark"], "bar");
        assert_eq!(json["encoding"]["x"]["field"], "State");
        assert_eq!(json["encoding"]["x"]["type"], "ordinal");
        assert_eq!(json["encoding"]["color"]["field"], "Category");
        assert_eq!(json["data"]["values"][1]["Category"], "# Injured");
        assert_eq!(json["width"], 600);
        assert_eq!(json["height"], 400);
        assert_eq!(spec.states(), vec!["CA"]);
    }

    #[test]
    fn view_span_halves_per_zoom_level() {
        let view = ViewState {
            latitude: 0.0,
            longitude: 0.0,
            zoom: 1.0,
            pitch: 0.0,
        };
        let (lon, lat) = view.span(512.0, 256.0);
        assert!((lon - 360.0).abs() < 1e-9);
        assert!((lat - 180.0).abs() < 1e-9);
    }
}
