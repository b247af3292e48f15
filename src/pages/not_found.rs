use leptos::prelude::*;

/// 404 - Not Found
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Uh oh! Ye've sailed off the edge of the map."</h1>
			<a href="/">"Back to the graph"</a>
		</div>
	}
}
