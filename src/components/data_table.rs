use leptos::prelude::*;

use crate::graph::table::TableData;

/// Rows behind the current view; hidden unless toggled on.
#[component]
pub fn DataTable(#[prop(into)] table: Signal<TableData>, #[prop(into)] visible: Signal<bool>) -> impl IntoView {
	view! {
		<section class="data-table" class:hidden=move || !visible.get()>
			{move || {
				let t = table.get();
				if t.is_empty() {
					return view! { <p class="empty">"No rows to show."</p> }.into_any();
				}
				view! {
					<table>
						<thead>
							<tr>
								{t.headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
							</tr>
						</thead>
						<tbody>
							{t
								.rows
								.into_iter()
								.map(|row| {
									view! {
										<tr>
											{row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
										</tr>
									}
								})
								.collect_view()}
						</tbody>
					</table>
				}
					.into_any()
			}}
		</section>
	}
}
