use crate::state::MAP_CONTAINER_ID;
use dioxus::prelude::*;

/// Target div for the OpenLayers map.
#[component]
pub fn MapContainer() -> Element {
    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            style: "width: 100%; height: 100%; min-height: 480px;",
        }
    }
}
