//! Derived dashboard content: state summaries, ranking and presenter
//! descriptions computed from the cleaned incidents.

use crate::charts::{BarChartSpec, DeckSpec, Tooltip, ViewState};
use crate::config::DashboardConfig;
use crate::data::{IncidentTable, LoadReport, PreparedData};
use crate::stats::{Aggregator, Ranker, StateSummary};
use serde::Serialize;

pub const TITLE: &str = "Gun Violence Incidents in the United States";
pub const INTRO: &str = "This app is a tool to explore gun violence incidents in the United States from 2013 to 2018. The data is sourced from the Gun Violence Archive and includes over 260,000 incidents.";
pub const MAP_HINT: &str = "The chart is interactive and you can hover over the bars to see the place and date where the incident occurred and the exact number of people injured and killed.";
pub const CHART_HEADER: &str = "Number of Injured and Killed by State";
pub const CHART_HINT: &str = "The bar chart shows the number of injured and killed by state. The chart is interactive and you can hover over the bars to see the exact number of injured and killed for each state.";

/// Everything the window shows, derived once from the incident table.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub incidents: IncidentTable,
    pub report: LoadReport,
    pub summaries: Vec<StateSummary>,
    pub top_states: Vec<StateSummary>,
    pub view: Option<ViewState>,
    pub tooltip: Tooltip,
    pub bar_chart: BarChartSpec,
    pub config: DashboardConfig,
}

/// Presenter descriptions as handed to an external rendering host.
#[derive(Debug, Serialize)]
pub struct SpecBundle<'a> {
    pub deck: DeckSpec,
    pub bar_chart: &'a BarChartSpec,
    pub top_states: &'a [StateSummary],
}

impl Dashboard {
    pub fn derive(prepared: PreparedData, config: &DashboardConfig) -> Self {
        let PreparedData { incidents, report } = prepared;

        let summaries = Aggregator::by_state(&incidents);
        let top_states = Ranker::top_k(&summaries, config.top_k);
        let view = ViewState::centered_on(&incidents, &config.map);
        let bar_chart = BarChartSpec::new(&summaries, config);

        let (killed, injured) = Aggregator::totals(&summaries);
        log::debug!(
            "Derived {} state summaries ({killed} killed, {injured} injured), top {} ranked",
            summaries.len(),
            top_states.len()
        );

        Self {
            incidents,
            report,
            summaries,
            top_states,
            view,
            tooltip: Tooltip::default(),
            bar_chart,
            config: config.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Header above the ranked table.
    pub fn top_header(&self) -> String {
        format!(
            "Top {} States with the Highest Number of Injured and Killed",
            self.config.top_k
        )
    }

    /// Sentence naming the ranked states.
    pub fn top_sentence(&self) -> String {
        if self.top_states.is_empty() {
            return "No states to rank.".to_string();
        }
        format!(
            "The top {} states with the highest number of injured and killed were: {}.",
            self.top_states.len(),
            Ranker::describe(&self.top_states)
        )
    }

    /// Full deck plus chart and table, ready for serialization.
    pub fn spec_bundle(&self) -> SpecBundle<'_> {
        SpecBundle {
            deck: DeckSpec::new(&self.incidents, &self.config.map),
            bar_chart: &self.bar_chart,
            top_states: &self.top_states,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::incident;
    use pretty_assertions::assert_eq;

    fn prepared(rows: Vec<crate::data::Incident>) -> PreparedData {
        let rows_kept = rows.len();
        PreparedData {
            incidents: rows.into(),
            report: LoadReport {
                rows_read: rows_kept,
                rows_kept,
                ..LoadReport::default()
            },
        }
    }

    #[test]
    fn derives_summaries_and_ranking() {
        let dashboard = Dashboard::derive(
            prepared(vec![
                incident("Texas", 10, 2),
                incident("California", 4, 5),
                incident("New York", 1, 0),
                incident("California", 6, 0),
            ]),
            &DashboardConfig {
                top_k: 2,
                ..DashboardConfig::default()
            },
        );

        assert_eq!(
            dashboard.top_states,
            vec![
                StateSummary::new("California", 10, 5),
                StateSummary::new("Texas", 10, 2),
            ]
        );
        assert_eq!(dashboard.summaries.len(), 3);
        assert_eq!(dashboard.bar_chart.data.values.len(), 6);
        assert_eq!(
            dashboard.top_sentence(),
            "The top 2 states with the highest number of injured and killed were: California and Texas."
        );
        assert_eq!(
            dashboard.top_header(),
            "Top 2 States with the Highest Number of Injured and Killed"
        );
    }

    #[test]
    fn empty_input_derives_empty_views() {
        let dashboard = Dashboard::derive(prepared(Vec::new()), &DashboardConfig::default());

        assert!(dashboard.is_empty());
        assert!(dashboard.summaries.is_empty());
        assert!(dashboard.top_states.is_empty());
        assert!(dashboard.view.is_none());
        assert!(dashboard.bar_chart.data.values.is_empty());
        assert_eq!(dashboard.top_sentence(), "No states to rank.");
    }

    #[test]
    fn bundle_carries_deck_chart_and_table() {
        let dashboard = Dashboard::derive(
            prepared(vec![incident("Ohio", 1, 2)]),
            &DashboardConfig::default(),
        );
        let json = serde_json::to_value(dashboard.spec_bundle()).unwrap();

        assert_eq!(json["deck"]["layers"][0]["@@type"], "ScatterplotLayer");
        assert_eq!(json["deck"]["initialViewState"]["zoom"], 4.0);
        assert_eq!(json["bar_chart"]["mark"], "bar");
        assert_eq!(json["top_states"][0]["State"], "Ohio");
        assert_eq!(json["top_states"][0]["# Injured"], 2);
    }
}
