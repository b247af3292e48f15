//! The "fun feature" dialogs. Each one fetches on open and renders a
//! small template; nothing is shared except the character cache.

use leptos::prelude::*;
use leptos::ev::MouseEvent;
use leptos::task::spawn_local;
use log::info;

use super::fetch::{Fetch, fetch_into, show_fetch};
use crate::api::ApiClient;
use crate::api::types::*;
use crate::config::ApiConfig;
use crate::graph::GraphView;

/// Which dialog is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
	/// Random adventure.
	Fortune,
	/// Random pirate identity.
	PirateName,
	/// Top-five boards.
	Leaderboard,
	/// Random quote.
	Wisdom,
	/// The rum tracker.
	Rum,
	/// Six degrees between two characters.
	PathFinder,
}

impl ModalKind {
	/// Dialog heading.
	pub fn title(self) -> &'static str {
		match self {
			ModalKind::Fortune => "Your Pirate Fortune",
			ModalKind::PirateName => "Your Pirate Name",
			ModalKind::Leaderboard => "Leaderboard",
			ModalKind::Wisdom => "Captain's Wisdom",
			ModalKind::Rum => "Rum Tracker",
			ModalKind::PathFinder => "Six Degrees of Separation",
		}
	}
}

/// Overlay hosting whichever dialog `open` names.
#[component]
pub fn Modal(
	open: RwSignal<Option<ModalKind>>,
	#[prop(into)] characters: Signal<Vec<Character>>,
	on_view: Callback<GraphView>,
) -> impl IntoView {
	move || {
		open.get().map(|kind| {
			let body = match kind {
				ModalKind::Fortune => view! { <FortuneModal /> }.into_any(),
				ModalKind::PirateName => view! { <PirateNameModal /> }.into_any(),
				ModalKind::Leaderboard => view! { <LeaderboardModal /> }.into_any(),
				ModalKind::Wisdom => view! { <WisdomModal /> }.into_any(),
				ModalKind::Rum => view! { <RumModal /> }.into_any(),
				ModalKind::PathFinder => {
					view! { <PathFinderModal characters=characters on_view=on_view open=open /> }
						.into_any()
				}
			};
			view! {
				<div class="modal-backdrop" on:click=move |_| open.set(None)>
					<div class="modal" on:click=|ev| ev.stop_propagation()>
						<header>
							<h2>{kind.title()}</h2>
							<button class="close" on:click=move |_| open.set(None)>"×"</button>
						</header>
						{body}
					</div>
				</div>
			}
		})
	}
}

#[component]
fn FortuneModal() -> impl IntoView {
	let config = expect_context::<ApiConfig>();
	let state = RwSignal::new(Fetch::Loading);
	let roll = move || {
		let api = ApiClient::new(config.clone());
		fetch_into(state, "fortune", async move { api.fortune().await });
	};
	roll();

	view! {
		{move || {
			show_fetch(
				state.get(),
				|f: Fortune| {
					view! {
						<blockquote class="fortune">{f.fortune}</blockquote>
						<dl>
							<dt>"Lucky number"</dt>
							<dd>{f.lucky_number}</dd>
							<dt>"Lucky item"</dt>
							<dd>{f.lucky_item}</dd>
						</dl>
					}
				},
			)
		}}
		<button on:click=move |_| roll()>"Consult the compass again"</button>
	}
}

#[component]
fn PirateNameModal() -> impl IntoView {
	let config = expect_context::<ApiConfig>();
	let state = RwSignal::new(Fetch::Loading);
	let roll = move || {
		let api = ApiClient::new(config.clone());
		fetch_into(state, "pirate name", async move { api.pirate_name().await });
	};
	roll();

	view! {
		{move || {
			show_fetch(
				state.get(),
				|p: PirateName| {
					view! {
						<p class="pirate-name">{p.pirate_name}</p>
						<dl>
							<dt>"Vessel"</dt>
							<dd>{p.vessel}</dd>
							<dt>"Crew"</dt>
							<dd>{p.crew_size}</dd>
							<dt>"Bounty"</dt>
							<dd>{p.bounty}</dd>
							<dt>"Reputation"</dt>
							<dd>{p.reputation}</dd>
						</dl>
					}
				},
			)
		}}
		<button on:click=move |_| roll()>"Another name"</button>
	}
}

fn board(title: &'static str, unit: &'static str, entries: Vec<LeaderEntry>) -> impl IntoView {
	view! {
		<section class="board">
			<h3>{title}</h3>
			<ol>
				{entries
					.into_iter()
					.map(|e| {
						let name = e.name.unwrap_or_else(|| "Unknown".into());
						let extra = e.faction.or(e.captain).map(|x| format!(" ({})", x)).unwrap_or_default();
						view! {
							<li>
								<span class="name">{name}</span>
								{extra}
								<span class="count">{format!("{} {}", e.connections, unit)}</span>
							</li>
						}
					})
					.collect_view()}
			</ol>
		</section>
	}
}

#[component]
fn LeaderboardModal() -> impl IntoView {
	let config = expect_context::<ApiConfig>();
	let state = RwSignal::new(Fetch::Loading);
	let api = ApiClient::new(config);
	fetch_into(state, "leaderboard", async move { api.leaderboard().await });

	move || {
		show_fetch(state.get(), |lb: Leaderboard| {
			view! {
				<div class="leaderboard">
					{board("Most Connected", "connections", lb.most_connected)}
					{board("Most Enemies", "enemies", lb.most_enemies)}
					{board("Most Appearances", "movies", lb.most_appearances)}
					{board("Most Traveled Ships", "locations", lb.most_traveled_ships)}
				</div>
			}
		})
	}
}

#[component]
fn WisdomModal() -> impl IntoView {
	let config = expect_context::<ApiConfig>();
	let state = RwSignal::new(Fetch::Loading);
	let roll = move || {
		let api = ApiClient::new(config.clone());
		fetch_into(state, "wisdom", async move { api.wisdom().await });
	};
	roll();

	view! {
		{move || {
			show_fetch(
				state.get(),
				|w: Wisdom| {
					view! {
						<blockquote class="wisdom">{format!("“{}”", w.quote)}</blockquote>
						<p class="speaker">{format!("— {}", w.speaker)}</p>
					}
				},
			)
		}}
		<button on:click=move |_| roll()>"More wisdom"</button>
	}
}

#[component]
fn RumModal() -> impl IntoView {
	let config = expect_context::<ApiConfig>();
	let state = RwSignal::new(Fetch::Loading);
	let api = ApiClient::new(config.clone());
	fetch_into(state, "rum count", async move { api.rum_count().await });

	let drink = move |_: MouseEvent| {
		let api = ApiClient::new(config.clone());
		spawn_local(async move {
			let result = api.rum_gone().await;
			if let Ok(r) = &result {
				info!("rum gone {} time(s)", r.times_gone);
			}
			state.set(Fetch::from_result("rum tracker", result));
		});
	};

	view! {
		{move || {
			show_fetch(
				state.get(),
				|r: RumCount| {
					view! {
						<p class="rum-message">
							{r.message.unwrap_or_else(|| "The rum is safe… for now.".into())}
						</p>
						<p class="rum-count">{format!("The rum has been gone {} time(s).", r.times_gone)}</p>
					}
				},
			)
		}}
		<button on:click=drink>"Drink the rum"</button>
	}
}

#[component]
fn PathFinderModal(
	#[prop(into)] characters: Signal<Vec<Character>>,
	on_view: Callback<GraphView>,
	open: RwSignal<Option<ModalKind>>,
) -> impl IntoView {
	let from = RwSignal::new(String::new());
	let to = RwSignal::new(String::new());
	let ready = move || {
		let (a, b) = (from.get(), to.get());
		!a.is_empty() && !b.is_empty() && a != b
	};

	let options = move || {
		characters
			.get()
			.into_iter()
			.map(|c| view! { <option value=c.id.clone()>{c.display_name().to_string()}</option> })
			.collect_view()
	};

	view! {
		<p>"Pick two characters and find how they are connected."</p>
		<div class="path-finder">
			<select on:change=move |ev| from.set(event_target_value(&ev))>
				<option value="">"From…"</option>
				{options}
			</select>
			<select on:change=move |ev| to.set(event_target_value(&ev))>
				<option value="">"To…"</option>
				{options}
			</select>
		</div>
		{move || {
			characters
				.with(Vec::is_empty)
				.then(|| view! { <p class="error">"Character list not loaded yet."</p> })
		}}
		<button
			disabled=move || !ready()
			on:click=move |_| {
				on_view
					.run(GraphView::Path {
						from: from.get_untracked(),
						to: to.get_untracked(),
					});
				open.set(None);
			}
		>
			"Find path"
		</button>
	}
}
