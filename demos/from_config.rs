use tank_pathfinding::{MapConfig, Point, SearchKind, TankMap};

/// Builds a map from a TOML snippet. Keys that are left out take their default values.
fn main() {
    let config: MapConfig = toml::from_str(
        r#"
        grid_width = 8
        grid_height = 5
        arena_width = 400.0
        arena_height = 250.0
        search = "Bfs"
        "#,
    )
    .unwrap();
    let mut map = TankMap::new(config).unwrap();
    assert_eq!(map.search_kind(), SearchKind::Bfs);
    let mut goal = Point::new(7, 4);
    map.request_path(map.cell_bounds(0, 0).center(), &mut goal)
        .unwrap();
    println!("{}", map);
    for p in map.active_path() {
        println!("{:?}", p);
    }
}
