// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading drawer configuration from JSON.
//!
//! Unknown position names fall back to collapsed with a warning.
//!
//! Run:
//! - `cargo run -p understory_demos --example drawer_config`

use kurbo::Size;
use understory_drawer::content::EmptyContent;
use understory_drawer::template::DrawerTemplate;
use understory_drawer::{DrawerConfig, DrawerController};

const CONFIG: &str = r#"{
    "top_inset": 44.0,
    "dimming_opacity_max": 0.35,
    "initial_position": "partiallyRevealed",
    "max_drawer_width": 600.0
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let config: DrawerConfig = serde_json::from_str(CONFIG)?;
    println!("loaded: {config:?}");

    let mut template = DrawerTemplate::new();
    template
        .embed_primary(Box::new(EmptyContent))
        .embed_drawer(Box::new(EmptyContent));
    let mut drawer = DrawerController::from_template(template, config)?;
    drawer.layout(Size::new(1024.0, 768.0));

    println!(
        "{} at {:.0} from the bottom, drawer frame {:?}",
        drawer.position(),
        drawer.distance_from_bottom(),
        drawer.drawer_frame()
    );

    let fallback: DrawerConfig = serde_json::from_str(r#"{ "initial_position": "sideways" }"#)?;
    println!("unknown name resolved to {}", fallback.initial_position);
    Ok(())
}
