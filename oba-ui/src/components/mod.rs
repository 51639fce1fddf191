//! Dioxus RSX components for the dashboard.

mod chart_container;
mod chart_header;
mod entity_selector;
mod error_display;
mod layer_switcher;
mod loading_spinner;
mod map_container;
mod menu;
mod month_picker;
mod popup;
mod scope_selector;
mod static_layer_switcher;
mod time_series_panel;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use entity_selector::EntitySelector;
pub use error_display::ErrorDisplay;
pub use layer_switcher::LayerSwitcher;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use menu::Menu;
pub use month_picker::MonthPicker;
pub use popup::Popup;
pub use scope_selector::ScopeSelector;
pub use static_layer_switcher::StaticLayerSwitcher;
pub use time_series_panel::TimeSeriesPanel;
