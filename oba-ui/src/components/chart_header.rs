use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Scope currently plotted, e.g. "County: BARREIRAS (2903201)"
    #[props(default = String::new())]
    pub scope: String,
    /// Metric units listed under the title
    #[props(default = Vec::new())]
    pub units: Vec<String>,
}

/// Title line of the time-series panel.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    let units = props.units.join(" · ");

    rsx! {
        div {
            style: "display: flex; align-items: baseline; gap: 12px; margin-bottom: 6px;",
            h3 {
                style: "margin: 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.scope.is_empty() {
                span {
                    style: "font-size: 13px; color: #333;",
                    "{props.scope}"
                }
            }
            if !units.is_empty() {
                span {
                    style: "font-size: 11px; color: #888; margin-left: auto;",
                    "{units}"
                }
            }
        }
    }
}
