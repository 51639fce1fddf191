//! The single owning store behind the dashboard.
//!
//! [`DashboardModel`] holds every piece of UI state and is only mutated through
//! [`Dashboard`] methods. Each mutation ends by handing the listener an
//! [`Update`] with the map commands it produced, so the renderer never reads
//! the model directly.

use crate::chart::ChartState;
use crate::command::{MapCommand, POPUP_AUTO_PAN_MS, POPUP_ELEMENT_ID};
use crate::error::Result;
use crate::layers::LayerCoordinator;
use crate::menu::{MenuChange, MenuEvent, MenuState};
use crate::popup::{PopupState, SlotState};
use crate::sequence::{RequestSequence, Ticket};
use crate::view::{ViewState, REGION_CENTER};
use futures::future::join_all;
use oba_core::api::DashboardApi;
use oba_core::config::Endpoints;
use oba_core::feature_info::FeatureValue;
use oba_core::geo::Coordinate;
use oba_core::geometry::{entity_list, find_centroid};
use oba_core::layer::{LayerError, LayerId, StaticLayer, ThematicLayer};
use oba_core::period::YearMonth;
use oba_core::scope::{CodeName, Scope, ScopeKind, Watershed};
use oba_core::tile_source::{TileSourceRegistry, TileSourceSet};
use oba_core::ApiError;
use oba_data::{ChartSpec, TimeSeries};
use std::cell::RefCell;
use std::rc::Rc;

/// What one mutation produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub commands: Vec<MapCommand>,
    pub chart_changed: bool,
    pub errors: Vec<String>,
}

/// Whether an async operation's result was applied or dropped as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Superseded,
}

pub struct DashboardModel {
    endpoints: Endpoints,
    registry: TileSourceRegistry,
    menu: MenuState,
    sources: TileSourceSet,
    view: ViewState,
    layers: LayerCoordinator,
    popup: PopupState,
    chart: ChartState,
    legends: [Option<String>; 3],
    error: Option<String>,
    recenter_seq: RequestSequence,
    chart_seq: RequestSequence,
    entity_seq: RequestSequence,
    popup_seq: RequestSequence,
    legend_seq: RequestSequence,
    outbox: Update,
}

impl DashboardModel {
    pub fn new(endpoints: Endpoints) -> Self {
        let menu = MenuState::default();
        let mut registry = TileSourceRegistry::new(endpoints.clone());
        let sources = registry.build(menu.scope(), menu.period());
        Self {
            endpoints,
            registry,
            layers: LayerCoordinator::new(menu.kind()),
            menu,
            sources,
            view: ViewState::default(),
            popup: PopupState::default(),
            chart: ChartState::default(),
            legends: [None, None, None],
            error: None,
            recenter_seq: RequestSequence::new(),
            chart_seq: RequestSequence::new(),
            entity_seq: RequestSequence::new(),
            popup_seq: RequestSequence::new(),
            legend_seq: RequestSequence::new(),
            outbox: Update::default(),
        }
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn sources(&self) -> &TileSourceSet {
        &self.sources
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn layers(&self) -> &LayerCoordinator {
        &self.layers
    }

    pub fn popup(&self) -> &PopupState {
        &self.popup
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    /// Latest reported error, until dismissed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Legend fragment of a thematic layer for the current year.
    pub fn legend(&self, layer: ThematicLayer) -> Option<&str> {
        self.legends[layer.index()].as_deref()
    }

    pub fn download_links(&self) -> Vec<(ThematicLayer, String)> {
        self.menu.download_links(&self.endpoints)
    }

    /// Everything a freshly mounted renderer needs.
    pub fn sync_commands(&self) -> Vec<MapCommand> {
        let mut commands = vec![self.view.to_command()];
        commands.extend(self.sources.iter().map(|(_, s)| MapCommand::set_source(s)));
        commands.extend(self.layers.sync_commands());
        commands
    }

    fn push(&mut self, command: MapCommand) {
        self.outbox.commands.push(command);
    }

    fn extend(&mut self, commands: Vec<MapCommand>) {
        self.outbox.commands.extend(commands);
    }

    fn report(&mut self, message: String) {
        log::error!("{}", message);
        self.error = Some(message.clone());
        self.outbox.errors.push(message);
    }

    fn take_update(&mut self) -> Update {
        std::mem::take(&mut self.outbox)
    }

    fn apply_menu(&mut self, event: MenuEvent) -> std::result::Result<MenuChange, crate::menu::MenuError> {
        let change = self.menu.apply(event)?;
        if change.kind_changed {
            let commands = self.layers.enter_scope(self.menu.kind());
            self.extend(commands);
        }
        if change.scope_changed || change.period_changed {
            self.rebuild_sources();
        }
        Ok(change)
    }

    /// New descriptors for the current (scope, period); the old set is never queried again.
    fn rebuild_sources(&mut self) {
        self.sources = self.registry.build(self.menu.scope(), self.menu.period());
        let commands: Vec<MapCommand> = self
            .sources
            .iter()
            .map(|(_, source)| MapCommand::set_source(source))
            .collect();
        self.extend(commands);
    }

    fn resolve_feature(
        &mut self,
        cycle: Ticket,
        layer: ThematicLayer,
        result: std::result::Result<String, ApiError>,
    ) -> bool {
        let (state, failure) = match result {
            Ok(body) => (SlotState::Ready(FeatureValue::decode(layer, &body)), None),
            Err(e) => {
                let message = e.to_string();
                (SlotState::Failed(message.clone()), Some(message))
            }
        };
        if !self.popup.resolve(cycle, layer, state) {
            log::debug!(
                "Discarding {} feature info from cycle {}",
                layer.name(),
                cycle.value()
            );
            return false;
        }
        if let Some(message) = failure {
            self.report(format!("Feature info for {} failed: {}", layer.label(), message));
        }
        true
    }
}

type Listener = Box<dyn Fn(&Update)>;

/// Cloneable handle to the store.
#[derive(Clone)]
pub struct Dashboard {
    model: Rc<RefCell<DashboardModel>>,
    listener: Rc<RefCell<Option<Listener>>>,
}

impl PartialEq for Dashboard {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.model, &other.model)
    }
}

impl Dashboard {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            model: Rc::new(RefCell::new(DashboardModel::new(endpoints))),
            listener: Rc::new(RefCell::new(None)),
        }
    }

    /// Install the single listener notified after every mutation.
    pub fn subscribe(&self, listener: impl Fn(&Update) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn read<R>(&self, f: impl FnOnce(&DashboardModel) -> R) -> R {
        f(&self.model.borrow())
    }

    /// Run `f` against the model, then notify outside the borrow.
    fn mutate<R>(&self, f: impl FnOnce(&mut DashboardModel) -> R) -> R {
        let (result, update) = {
            let mut model = self.model.borrow_mut();
            let result = f(&mut model);
            (result, model.take_update())
        };
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(&update);
        }
        result
    }

    /// Bring a fresh renderer in sync and load everything the default scope shows.
    pub async fn start(&self, api: &impl DashboardApi) {
        self.mutate(|m| {
            let commands = m.sync_commands();
            m.extend(commands);
        });
        let _ = futures::join!(
            self.recenter(api),
            self.refresh_chart(api),
            self.refresh_entities(api),
            self.refresh_legends(api),
        );
    }

    pub async fn select_kind(&self, api: &impl DashboardApi, kind: ScopeKind) -> Result<Outcome> {
        self.dispatch(api, vec![MenuEvent::SelectKind(kind)]).await
    }

    pub async fn select_watershed(
        &self,
        api: &impl DashboardApi,
        watershed: Watershed,
    ) -> Result<Outcome> {
        self.dispatch(api, vec![MenuEvent::SelectWatershed(watershed)])
            .await
    }

    pub async fn select_entity(&self, api: &impl DashboardApi, entity: CodeName) -> Result<Outcome> {
        self.dispatch(api, vec![MenuEvent::SelectEntity(entity)]).await
    }

    /// Jump straight to a fully resolved scope.
    pub async fn set_scope(&self, api: &impl DashboardApi, scope: Scope) -> Result<Outcome> {
        let mut events = vec![MenuEvent::SelectKind(scope.kind())];
        match scope {
            Scope::Region => {}
            Scope::Watershed(ws) => events.push(MenuEvent::SelectWatershed(ws)),
            Scope::Drainage(entity) | Scope::County(entity) => {
                events.push(MenuEvent::SelectEntity(entity))
            }
        }
        self.dispatch(api, events).await
    }

    pub async fn set_period(&self, api: &impl DashboardApi, period: YearMonth) -> Result<Outcome> {
        self.dispatch(api, vec![MenuEvent::SetPeriod(period)]).await
    }

    async fn dispatch(&self, api: &impl DashboardApi, events: Vec<MenuEvent>) -> Result<Outcome> {
        let change = self.mutate(|m| {
            let mut total = MenuChange::default();
            for event in events {
                let change = m.apply_menu(event)?;
                total.kind_changed |= change.kind_changed;
                total.scope_changed |= change.scope_changed;
                total.period_changed |= change.period_changed;
            }
            Ok::<_, crate::menu::MenuError>(total)
        })
        .map_err(|e| {
            log::warn!("Rejected menu event: {}", e);
            e
        })?;

        let scope_work = async {
            if !change.scope_changed {
                return Ok(Outcome::Applied);
            }
            let (recenter, _, _) = futures::join!(
                self.recenter(api),
                self.refresh_chart(api),
                async {
                    if change.kind_changed {
                        let _ = self.refresh_entities(api).await;
                    }
                },
            );
            recenter
        };
        let legend_work = async {
            if change.period_changed {
                self.refresh_legends(api).await;
            }
        };
        let (result, ()) = futures::join!(scope_work, legend_work);
        Ok(result?)
    }

    /// Fly to the current scope's centroid. Region needs no lookup.
    ///
    /// Only the most recently requested recenter is applied; a lookup failure
    /// leaves the view where it was.
    pub async fn recenter(&self, api: &impl DashboardApi) -> std::result::Result<Outcome, ApiError> {
        let (scope, ticket) = self.mutate(|m| (m.menu.scope().clone(), m.recenter_seq.issue()));
        let target = match scope.kind() {
            ScopeKind::Region => Ok(REGION_CENTER),
            kind => match api.fetch_geometry(kind).await {
                Ok(records) => find_centroid(&records, &scope),
                Err(e) => Err(e),
            },
        };
        self.mutate(|m| {
            if !m.recenter_seq.is_current(ticket) {
                match &target {
                    Ok(_) => log::debug!("Dropping superseded recenter to {}", scope),
                    Err(e) => log::debug!("Superseded recenter to {} failed: {}", scope, e),
                }
                return Ok(Outcome::Superseded);
            }
            match target {
                Ok(center) => {
                    let command = m.view.fly_to(center);
                    m.push(command);
                    Ok(Outcome::Applied)
                }
                Err(e) => {
                    m.report(format!("Could not locate {}: {}", scope, e));
                    Err(e)
                }
            }
        })
    }

    /// Reload the chart for the current scope.
    pub async fn refresh_chart(
        &self,
        api: &impl DashboardApi,
    ) -> std::result::Result<Outcome, ApiError> {
        let (scope, ticket) = self.mutate(|m| {
            let scope = m.menu.scope().clone();
            m.chart = ChartState::Loading(scope.clone());
            m.outbox.chart_changed = true;
            (scope, m.chart_seq.issue())
        });
        let result = api.fetch_stats(&scope).await;
        self.mutate(|m| {
            if !m.chart_seq.is_current(ticket) {
                log::debug!("Dropping superseded stats for {}", scope);
                return Ok(Outcome::Superseded);
            }
            m.outbox.chart_changed = true;
            let series = result.and_then(|records| {
                TimeSeries::from_records(scope.kind(), &records)
                    .map_err(|e| ApiError::Decode(e.to_string()))
            });
            match series {
                Ok(series) => {
                    log::info!("Loaded {} months of stats for {}", series.len(), scope);
                    let spec = ChartSpec::from_series(scope.label(), &series);
                    m.chart = ChartState::Ready { scope, spec };
                    Ok(Outcome::Applied)
                }
                Err(e) => {
                    m.report(format!("No chart data for {}: {}", scope, e));
                    m.chart = ChartState::NoData {
                        scope,
                        reason: e.to_string(),
                    };
                    Err(e)
                }
            }
        })
    }

    /// Reload the secondary picker's entity list, for kinds that have one.
    pub async fn refresh_entities(
        &self,
        api: &impl DashboardApi,
    ) -> std::result::Result<Outcome, ApiError> {
        let (kind, ticket) = self.mutate(|m| (m.menu.kind(), m.entity_seq.issue()));
        if !kind.has_entity_list() {
            return Ok(Outcome::Applied);
        }
        let result = api
            .fetch_geometry(kind)
            .await
            .map(|records| entity_list(&records));
        self.mutate(|m| {
            if !m.entity_seq.is_current(ticket) {
                log::debug!("Dropping superseded {} list", kind);
                return Ok(Outcome::Superseded);
            }
            match result {
                Ok(entities) => {
                    if entities.is_empty() {
                        log::warn!("Empty {} list", kind);
                    }
                    if m.menu.set_entities(kind, entities) {
                        Ok(Outcome::Applied)
                    } else {
                        Ok(Outcome::Superseded)
                    }
                }
                Err(e) => {
                    m.report(format!("Failed to load {} list: {}", kind, e));
                    Err(e)
                }
            }
        })
    }

    /// Fetch the legend of every thematic layer for the current year.
    pub async fn refresh_legends(&self, api: &impl DashboardApi) {
        let (ticket, urls) = self.mutate(|m| {
            let period = m.menu.period();
            let urls = ThematicLayer::ALL.map(|layer| (layer, m.registry.legend_url(layer, period)));
            (m.legend_seq.issue(), urls)
        });
        let results = join_all(
            urls.iter()
                .map(|(layer, url)| async move { (*layer, api.fetch_text(url).await) }),
        )
        .await;
        self.mutate(|m| {
            if !m.legend_seq.is_current(ticket) {
                return;
            }
            for (layer, result) in results {
                m.legends[layer.index()] = match result {
                    Ok(html) => Some(html),
                    Err(e) => {
                        log::warn!("Legend for {} unavailable: {}", layer.name(), e);
                        None
                    }
                };
            }
        });
    }

    /// Query every thematic layer at a clicked point and fill the pop-up as
    /// answers arrive.
    pub async fn click(
        &self,
        api: &impl DashboardApi,
        coordinate: Coordinate,
        resolution: f64,
    ) -> std::result::Result<Outcome, ApiError> {
        let (cycle, queries) = self.mutate(|m| {
            let queries =
                match m
                    .sources
                    .feature_queries(coordinate, resolution, m.view.projection)
                {
                    Ok(queries) => queries,
                    Err(e) => {
                        m.report(format!("Cannot query features: {}", e));
                        return Err(e);
                    }
                };
            let cycle = m.popup_seq.issue();
            m.popup.begin(cycle, coordinate);
            m.push(MapCommand::AttachOverlay {
                element_id: POPUP_ELEMENT_ID,
                position: coordinate,
                auto_pan_ms: POPUP_AUTO_PAN_MS,
            });
            Ok((cycle, queries))
        })?;

        let applied = join_all(queries.into_iter().map(|(layer, url)| async move {
            let result = api.fetch_text(&url).await;
            self.mutate(|m| m.resolve_feature(cycle, layer, result))
        }))
        .await;
        Ok(if applied.contains(&true) {
            Outcome::Applied
        } else {
            Outcome::Superseded
        })
    }

    /// Hide the pop-up. Queries still in flight are discarded on arrival.
    pub fn close_popup(&self) {
        self.mutate(|m| {
            m.popup.close();
            m.push(MapCommand::DetachOverlay {
                element_id: POPUP_ELEMENT_ID,
            });
        });
    }

    pub fn set_thematic_layer(&self, layer: ThematicLayer) {
        self.mutate(|m| {
            let commands = m.layers.set_thematic_layer(layer);
            m.extend(commands);
        });
    }

    pub fn set_static_layer_visible(
        &self,
        layer: StaticLayer,
        visible: bool,
    ) -> std::result::Result<(), LayerError> {
        self.mutate(|m| {
            let commands = m.layers.set_static_layer_visible(layer, visible)?;
            m.extend(commands);
            Ok(())
        })
    }

    /// Toggle a layer by its map name.
    pub fn set_layer_visible(&self, name: &str, visible: bool) -> std::result::Result<(), LayerError> {
        self.mutate(|m| {
            let commands = m.layers.set_visible_by_name(name, visible)?;
            m.extend(commands);
            Ok(())
        })
    }

    pub fn set_opacity(&self, layer: LayerId, value: f64) -> std::result::Result<(), LayerError> {
        self.mutate(|m| {
            let command = m.layers.set_opacity(layer, value)?;
            m.push(command);
            Ok(())
        })
    }

    /// Explicit navigation, e.g. a "back to region" control.
    pub fn navigate(&self, center: Coordinate, zoom: f64) {
        self.mutate(|m| {
            let command = m.view.navigate(center, zoom);
            m.push(command);
        });
    }

    pub fn dismiss_error(&self) {
        self.mutate(|m| m.error = None);
    }
}
