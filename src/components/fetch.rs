//! Fetch-and-show plumbing shared by panels and modals.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::error::Result;

/// Lifecycle of a single request as seen by a panel.
#[derive(Clone, Debug, PartialEq)]
pub enum Fetch<T> {
	/// Request in flight.
	Loading,
	/// Decoded response.
	Ready(T),
	/// Static message for the panel; details went to the console.
	Failed(String),
}

impl<T> Fetch<T> {
	/// Map a request outcome, logging failures.
	pub fn from_result(what: &str, result: Result<T>) -> Self {
		match result {
			Ok(v) => Fetch::Ready(v),
			Err(e) => {
				error!("failed to load {}: {}", what, e);
				Fetch::Failed(format!("Failed to load {}.", what))
			}
		}
	}
}

/// Run `fut` on the UI thread and store its outcome in `target`.
pub fn fetch_into<T, F>(target: RwSignal<Fetch<T>>, what: &'static str, fut: F)
where
	T: Send + Sync + 'static,
	F: Future<Output = Result<T>> + 'static,
{
	target.set(Fetch::Loading);
	spawn_local(async move {
		target.set(Fetch::from_result(what, fut.await));
	});
}

/// Render `state`, delegating the ready case to `ready`.
pub fn show_fetch<T, V>(state: Fetch<T>, ready: impl FnOnce(T) -> V) -> AnyView
where
	V: IntoView + 'static,
{
	match state {
		Fetch::Loading => view! { <p class="loading">"Hoisting the sails…"</p> }.into_any(),
		Fetch::Failed(msg) => view! { <p class="error">{msg}</p> }.into_any(),
		Fetch::Ready(v) => ready(v).into_any(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::AppError;

	#[test]
	fn failures_become_static_messages() {
		let f: Fetch<u32> = Fetch::from_result("fortune", Err(AppError::Http("offline".into())));
		assert_eq!(f, Fetch::Failed("Failed to load fortune.".into()));
		assert_eq!(Fetch::from_result("fortune", Ok(3)), Fetch::Ready(3));
	}
}
