use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info, warn};

use crate::api::ApiClient;
use crate::api::types::{Character, Health, Movie};
use crate::components::data_table::DataTable;
use crate::components::details::DetailsPanel;
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::components::modals::{Modal, ModalKind};
use crate::components::status::{LoadStatus, StatusBar};
use crate::components::toolbar::Toolbar;
use crate::config::ApiConfig;
use crate::graph::table::TableData;
use crate::graph::{GraphView, load_view, palette};

/// Health, movie list and character cache. Each failure is only logged;
/// the page works without them.
async fn load_reference_data(
	api: ApiClient,
	health: RwSignal<Option<Health>>,
	movies: RwSignal<Vec<Movie>>,
	characters: RwSignal<Vec<Character>>,
) {
	match api.health().await {
		Ok(h) => {
			if !h.is_connected() {
				warn!("API reachable but database is not: {:?}", h.message);
			}
			health.set(Some(h));
		}
		Err(e) => {
			error!("health check failed: {}", e);
			health.set(Some(Health {
				status: "unreachable".into(),
				uri: None,
				message: Some("unreachable".into()),
			}));
		}
	}
	match api.movies().await {
		Ok(m) => movies.set(m),
		Err(e) => error!("failed to load movies: {}", e),
	}
	match api.characters().await {
		Ok(c) => {
			info!("cached {} characters", c.len());
			characters.set(c);
		}
		Err(e) => error!("failed to load characters: {}", e),
	}
}

#[component]
fn Legend() -> impl IntoView {
	let types = ["Character", "Ship", "Location", "Movie", "Faction"];
	let conflicts = ["ENEMY", "RIVALRY", "BETRAYED", "MISTRUST"];
	view! {
		<div class="legend">
			{types
				.into_iter()
				.map(|t| {
					view! {
						<span class="legend-item">
							<span
								class="swatch"
								style=format!("background: {}", palette::node_type_color(t))
							></span>
							{t}
						</span>
					}
				})
				.collect_view()}
			{conflicts
				.into_iter()
				.map(|c| {
					view! {
						<span class="legend-item">
							<span
								class="line"
								style=format!("border-color: {}", palette::conflict_color(c))
							></span>
							{c}
						</span>
					}
				})
				.collect_view()}
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = expect_context::<ApiConfig>();

	let current_view = RwSignal::new(GraphView::Full);
	let movie_filter = RwSignal::new(None::<String>);
	let movies = RwSignal::new(Vec::<Movie>::new());
	let characters = RwSignal::new(Vec::<Character>::new());
	let graph = RwSignal::new(GraphData::default());
	let table = RwSignal::new(TableData::default());
	let show_table = RwSignal::new(false);
	let status = RwSignal::new(LoadStatus::Idle);
	let selected = RwSignal::new(None::<String>);
	let health = RwSignal::new(None::<Health>);
	let modal = RwSignal::new(None::<ModalKind>);

	let view_config = config.clone();
	let on_view = Callback::new(move |view: GraphView| {
		let api = ApiClient::new(view_config.clone());
		let movie = movie_filter.get_untracked();
		status.set(LoadStatus::Loading(view.title()));
		spawn_local(async move {
			match load_view(&api, &view, movie.as_deref()).await {
				Ok(result) => {
					info!(
						"{}: {} nodes, {} edges",
						view.title(),
						result.graph.nodes.len(),
						result.graph.links.len()
					);
					selected.set(None);
					graph.set(result.graph);
					table.set(result.table);
					status.set(LoadStatus::Loaded(result.summary));
					current_view.set(view);
				}
				Err(e) => {
					error!("failed to load {}: {}", view.title(), e);
					status.set(LoadStatus::Failed(format!("Failed to load {}.", view.title())));
				}
			}
		});
	});

	spawn_local(load_reference_data(
		ApiClient::new(config),
		health,
		movies,
		characters,
	));
	on_view.run(GraphView::Full);

	view! {
		<div class="explorer">
			<header class="title-bar">
				<h1>"Pirates of the Caribbean Graph Explorer"</h1>
				<h2>{move || current_view.get().title()}</h2>
			</header>

			<Toolbar
				view=current_view
				movies=movies
				movie_filter=movie_filter
				show_table=show_table
				on_view=on_view
				on_modal=Callback::new(move |kind: ModalKind| modal.set(Some(kind)))
			/>

			<main class="graph-area">
				<div class="graph-container">
					<ForceGraphCanvas
						data=graph
						selected=selected
						on_select=Callback::new(move |id: Option<String>| selected.set(id))
					/>
					<Legend />
				</div>
				<DetailsPanel graph=graph selected=selected />
			</main>

			<DataTable table=table visible=show_table />
			<StatusBar health=health graph=graph status=status />
			<Modal open=modal characters=characters on_view=on_view />
		</div>
	}
}
