use dioxus::prelude::*;
use goldrush_domain::{project_grid, Cell, Snapshot, WorldBounds};

fn tile_class(cell: &Cell) -> &'static str {
    match (cell.pickup, cell.blocked) {
        (true, _) => "tile pickup",
        (false, true) => "tile blocked",
        (false, false) => "tile",
    }
}

/// The world grid, top row first
#[component]
pub fn Board(world: Snapshot, bounds: WorldBounds) -> Element {
    let rows: Vec<(i32, Vec<(String, &'static str, String)>)> = project_grid(&world, bounds)
        .into_iter()
        .map(|row| {
            let y = row.first().map(|cell| cell.coord.y).unwrap_or_default();
            let cells = row
                .iter()
                .map(|cell| {
                    (
                        format!("{}-{}", cell.coord.x, cell.coord.y),
                        tile_class(cell),
                        cell.glyph().to_string(),
                    )
                })
                .collect();
            (y, cells)
        })
        .collect();

    rsx! {
        div {
            class: "grid",
            for (y, cells) in rows {
                div {
                    key: "{y}",
                    class: "row",
                    for (key, class, glyph) in cells {
                        div { key: "{key}", class, "{glyph}" }
                    }
                }
            }
        }
    }
}
