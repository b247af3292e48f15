use leptos::prelude::*;

use crate::api::types::Health;
use crate::components::force_graph::GraphData;

/// What the main canvas is doing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadStatus {
	/// Nothing requested yet.
	#[default]
	Idle,
	/// Waiting on the named view.
	Loading(String),
	/// Loaded, with an optional note.
	Loaded(Option<String>),
	/// Static failure message; the previous graph stays on screen.
	Failed(String),
}

/// Footer line: API health, graph size and the latest load outcome.
#[component]
pub fn StatusBar(
	#[prop(into)] health: Signal<Option<Health>>,
	#[prop(into)] graph: Signal<GraphData>,
	#[prop(into)] status: Signal<LoadStatus>,
) -> impl IntoView {
	let health_text = move || match health.get() {
		None => ("unknown", "API: checking…".to_string()),
		Some(h) if h.is_connected() => ("ok", "API: connected".to_string()),
		Some(h) => (
			"down",
			format!("API: {}", h.message.unwrap_or(h.status)),
		),
	};

	view! {
		<footer class="status-bar">
			<span class=move || format!("health {}", health_text().0)>{move || health_text().1}</span>
			<span class="counts">
				{move || graph.with(|g| format!("{} nodes · {} edges", g.nodes.len(), g.links.len()))}
			</span>
			<span class="load">
				{move || match status.get() {
					LoadStatus::Idle => view! { <span /> }.into_any(),
					LoadStatus::Loading(what) => {
						view! { <span class="loading">{format!("Loading {}…", what)}</span> }.into_any()
					}
					LoadStatus::Loaded(note) => {
						view! { <span class="note">{note.unwrap_or_default()}</span> }.into_any()
					}
					LoadStatus::Failed(msg) => view! { <span class="error">{msg}</span> }.into_any(),
				}}
			</span>
		</footer>
	}
}
