use leptos::prelude::*;
use leptos::task::spawn_local;

use super::fetch::{Fetch, show_fetch};
use crate::api::ApiClient;
use crate::api::types::{Connection, Movie};
use crate::components::force_graph::{GraphData, GraphNode};
use crate::config::ApiConfig;
use crate::graph::table::display_value;

/// Properties of the selected node; characters also get their
/// connections and movie appearances.
#[component]
pub fn DetailsPanel(
	#[prop(into)] graph: Signal<GraphData>,
	selected: RwSignal<Option<String>>,
) -> impl IntoView {
	let config = expect_context::<ApiConfig>();
	let connections: RwSignal<Option<Fetch<Vec<Connection>>>> = RwSignal::new(None);
	let appearances: RwSignal<Option<Fetch<Vec<Movie>>>> = RwSignal::new(None);

	let node = Memo::new(move |_| {
		let id = selected.get()?;
		graph.with(|g| g.node(&id).cloned())
	});

	Effect::new(move |_| {
		connections.set(None);
		appearances.set(None);
		let Some(node) = node.get() else {
			return;
		};
		if node.group.as_deref() != Some("Character") {
			return;
		}
		connections.set(Some(Fetch::Loading));
		appearances.set(Some(Fetch::Loading));
		let api = ApiClient::new(config.clone());
		spawn_local(async move {
			let conns = Fetch::from_result("connections", api.character_connections(&node.id).await);
			let movies = Fetch::from_result("movie appearances", api.character_movies(&node.id).await);
			// the user may have clicked elsewhere meanwhile
			if selected.get_untracked().as_deref() != Some(node.id.as_str()) {
				return;
			}
			connections.set(Some(conns));
			appearances.set(Some(movies));
		});
	});

	view! {
		<aside class="details-panel" class:hidden=move || node.with(Option::is_none)>
			{move || node.get().map(|n| node_summary(n, selected))}
			{move || {
				connections
					.get()
					.map(|state| {
						show_fetch(
							state,
							|rows| {
								view! {
									<h3>"Connections"</h3>
									<ul class="connections">
										{rows.into_iter().map(connection_item).collect_view()}
									</ul>
								}
							},
						)
					})
			}}
			{move || {
				appearances
					.get()
					.map(|state| {
						show_fetch(
							state,
							|movies| {
								view! {
									<h3>"Appears in"</h3>
									<ul class="appearances">
										{movies
											.into_iter()
											.map(|m| view! { <li>{m.display_name()}</li> })
											.collect_view()}
									</ul>
								}
							},
						)
					})
			}}
		</aside>
	}
}

fn node_summary(n: GraphNode, selected: RwSignal<Option<String>>) -> impl IntoView {
	let props: Vec<(String, String)> = n
		.props
		.iter()
		.filter(|(k, _)| k.as_str() != "id")
		.map(|(k, v)| (k.replace('_', " "), display_value(v)))
		.collect();
	view! {
		<header>
			<h2>{n.label.clone().unwrap_or_else(|| n.id.clone())}</h2>
			<span class="badge">{n.group.clone().unwrap_or_default()}</span>
			<button class="close" on:click=move |_| selected.set(None)>"×"</button>
		</header>
		<dl class="props">
			{props
				.into_iter()
				.map(|(k, v)| view! { <dt>{k}</dt> <dd>{v}</dd> })
				.collect_view()}
		</dl>
	}
}

fn connection_item(c: Connection) -> impl IntoView {
	let what = c.rel_detail.clone().unwrap_or(c.relationship_type.clone());
	let who = c
		.connected_name
		.clone()
		.or(c.connected_id.clone())
		.unwrap_or_default();
	let kind = c.connected_type.clone().unwrap_or_default();
	let movie = c.movie_id.map(|m| format!(" ({})", m)).unwrap_or_default();
	view! {
		<li>
			<span class="rel">{what}</span>
			" → "
			<span class="who">{who}</span>
			<span class="kind">{format!(" [{}]", kind)}</span>
			{movie}
		</li>
	}
}
