use leptos::prelude::*;
use web_sys::KeyboardEvent;

use super::modals::ModalKind;
use crate::api::types::Movie;
use crate::graph::GraphView;

/// View buttons, movie filter, search box and fun-feature launchers.
#[component]
pub fn Toolbar(
	#[prop(into)] view: Signal<GraphView>,
	#[prop(into)] movies: Signal<Vec<Movie>>,
	movie_filter: RwSignal<Option<String>>,
	show_table: RwSignal<bool>,
	on_view: Callback<GraphView>,
	on_modal: Callback<ModalKind>,
) -> impl IntoView {
	let (query, set_query) = signal(String::new());
	let run_search = move || {
		let q = query.get_untracked().trim().to_string();
		if !q.is_empty() {
			on_view.run(GraphView::Search(q));
		}
	};

	let view_button = move |label: &'static str, target: GraphView| {
		let active_target = target.clone();
		view! {
			<button
				class="view-button"
				class:active=move || view.get() == active_target
				on:click=move |_| on_view.run(target.clone())
			>
				{label}
			</button>
		}
	};

	view! {
		<nav class="toolbar">
			<div class="toolbar-group">
				{view_button("Full Graph", GraphView::Full)}
				{view_button("Characters", GraphView::Characters)}
				{view_button("Ship Routes", GraphView::ShipRoutes)}
				{view_button("Rivalries", GraphView::Rivalries)}
				{view_button("Factions", GraphView::Factions)}
			</div>

			<div class="toolbar-group">
				<label for="movie-select">"Movie"</label>
				<select
					id="movie-select"
					on:change=move |ev| {
						let id = event_target_value(&ev);
						movie_filter.set(Some(id).filter(|v| !v.is_empty()));
						match (view.get_untracked(), movie_filter.get_untracked()) {
							(current, _) if current.uses_movie_filter() => on_view.run(current),
							(GraphView::Search(_) | GraphView::Path { .. }, _) => {}
							(GraphView::Movie { .. }, None) => on_view.run(GraphView::Characters),
							(_, Some(id)) => {
								let title = movies
									.with_untracked(|all| {
										all.iter().find(|m| m.id == id).map(Movie::display_name)
									})
									.unwrap_or_else(|| id.clone());
								on_view.run(GraphView::Movie { id, title });
							}
							_ => {}
						}
					}
				>
					<option value="">"All movies"</option>
					{move || {
						movies
							.get()
							.into_iter()
							.map(|m| {
								let selected = movie_filter.get_untracked().as_deref() == Some(m.id.as_str());
								view! {
									<option value=m.id.clone() selected=selected>
										{m.display_name()}
									</option>
								}
							})
							.collect_view()
					}}
				</select>
			</div>

			<div class="toolbar-group">
				<input
					type="search"
					placeholder="Search the seven seas…"
					prop:value=query
					on:input=move |ev| set_query.set(event_target_value(&ev))
					on:keydown=move |ev: KeyboardEvent| {
						if ev.key() == "Enter" {
							run_search();
						}
					}
				/>
				<button on:click=move |_| run_search()>"Search"</button>
				<button
					class:active=move || show_table.get()
					on:click=move |_| show_table.update(|v| *v = !*v)
				>
					{move || if show_table.get() { "Hide Table" } else { "Show Table" }}
				</button>
			</div>

			<div class="toolbar-group fun">
				<button on:click=move |_| on_modal.run(ModalKind::PathFinder)>"Six Degrees"</button>
				<button on:click=move |_| on_modal.run(ModalKind::Fortune)>"Fortune"</button>
				<button on:click=move |_| on_modal.run(ModalKind::PirateName)>"Pirate Name"</button>
				<button on:click=move |_| on_modal.run(ModalKind::Leaderboard)>"Leaderboard"</button>
				<button on:click=move |_| on_modal.run(ModalKind::Wisdom)>"Wisdom"</button>
				<button on:click=move |_| on_modal.run(ModalKind::Rum)>"Rum"</button>
			</div>
		</nav>
	}
}
