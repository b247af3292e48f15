#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use pirate_graph_explorer::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
