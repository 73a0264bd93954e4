use tank_pathfinding::{ObjectKind, Point, TankMap, WorldRect};

// A tank in the top-left corner drives to the middle of the arena. An own base is sighted
// across the direct route, and a shell lands on a cell the tank later drives over.
//
// The map is printed before driving, with
// - O for an own base
// - s for a shell
// - * for the cells of the route
fn main() {
    let mut map = TankMap::default();
    let base = map.cell_bounds(5, 5);
    map.mark(
        WorldRect::new(base.left, base.top, base.width() * 2.5, base.height()),
        ObjectKind::OwnBase,
    );
    let shell = map.cell_bounds(2, 2).center();
    map.mark(
        WorldRect::new(shell.x - 1.0, shell.y - 1.0, 2.0, 2.0),
        ObjectKind::EnemyShell,
    );

    let mut agent = map.cell_bounds(0, 0).center();
    let mut goal = Point::new(9, 6);
    map.request_path(agent, &mut goal).unwrap();
    println!("{}", map);

    while map.has_path() {
        agent = map.follow_path(agent);
        println!("Driving to {:?}", map.world_to_cell(agent.x, agent.y));
    }
    println!("{}", map);
}
