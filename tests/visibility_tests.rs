mod common;

use common::{placed_robot, plus_grid};
use gridbot::render::{PlainRenderer, ViewRenderer};
use gridbot::{compute_view, Grid, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_look_radius_one_from_center() {
    let robot = placed_robot(1);
    let view = robot.look_around().unwrap();

    assert_eq!(view.robot, Position::new(1, 1));
    assert_eq!(view.offset, Position::new(1, 1));
    assert_eq!(view.visible_symbol(Position::new(1, 1)), Some('^'));

    for (r, c) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
        assert_eq!(view.visible_symbol(Position::new(r, c)), Some('.'));
    }
    for (r, c) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
        assert_eq!(view.visible_symbol(Position::new(r, c)), None);
    }

    assert_eq!(PlainRenderer.render(&view), " . \n.^.\n . ");
}

#[test]
fn test_look_does_not_touch_grid() {
    let robot = placed_robot(2);
    let before = robot.grid().unwrap().clone();

    robot.look_around().unwrap();

    assert_eq!(robot.grid().unwrap(), &before);
    assert_eq!(before, plus_grid());
}

#[test]
fn test_look_sees_walls_after_moving() {
    let mut robot = placed_robot(2);
    robot.up().unwrap();
    robot.turn_right().unwrap();

    let view = robot.look_around().unwrap();

    // Robot at (1, 2): window rows 0..=3, cols 0..=4
    assert_eq!(view.offset, Position::new(0, 0));
    assert_eq!(view.symbols.len(), 4);
    assert_eq!(view.symbols[0].len(), 5);
    assert_eq!(view.robot, Position::new(1, 2));
    assert_eq!(view.visible_symbol(Position::new(1, 2)), Some('>'));
    assert_eq!(view.visible_symbol(Position::new(0, 2)), Some('x'));
    assert_eq!(view.visible_symbol(Position::new(1, 1)), Some('+'));
    assert_eq!(view.visible_symbol(Position::new(3, 2)), Some('.'));
    assert_eq!(view.visible_symbol(Position::new(3, 0)), None);
}

#[test]
fn test_mask_is_circle_on_random_grids() {
    let mut rng = StdRng::seed_from_u64(5);
    let grid = Grid::generate_random_with(9, 11, 0.25, &mut rng).unwrap();

    for radius in [1, 2, 3, 6] {
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let origin = Position::new(row, col);
                let view = compute_view(&grid, origin, radius);

                for (r, mask_row) in view.mask.iter().enumerate() {
                    for (c, &seen) in mask_row.iter().enumerate() {
                        let global = view.to_global(Position::new(r as i32, c as i32));
                        assert!(grid.contains(global));
                        assert_eq!(
                            seen,
                            global.distance_squared(&origin) <= (radius as i64).pow(2),
                            "origin {} cell {}",
                            origin,
                            global
                        );
                        assert_eq!(view.window[r][c], grid.cell_kind(global).unwrap());
                    }
                }
            }
        }
    }
}

#[test]
fn test_huge_radius_returns_whole_grid() {
    let grid = Grid::new(&[[0u8; 4]; 3]).unwrap();

    for origin in [Position::new(0, 0), Position::new(2, 3), Position::new(4, 5)] {
        for radius in [50_000, i32::MAX - 1, i32::MAX] {
            let view = compute_view(&grid, origin, radius);

            assert_eq!(view.offset, Position::new(0, 0));
            assert_eq!(view.window, grid.matrix());
            assert_eq!(view.to_global(view.origin), origin);
            assert!(view.is_visible(view.origin));
            assert_eq!(view.visible_cells().len(), (grid.rows * grid.cols) as usize);
        }
    }
}

#[test]
fn test_look_with_max_radius() {
    let mut robot = gridbot::Robot::new(i32::MAX);
    robot.place_in_grid(Grid::new(&[[0u8]]).unwrap()).unwrap();

    let view = robot.look_around().unwrap();

    assert_eq!(view.robot, Position::new(1, 1));
    assert_eq!(view.visible_symbol(Position::new(1, 1)), Some('^'));
    assert_eq!(view.visible_symbol(Position::new(0, 0)), Some('x'));
    assert_eq!(PlainRenderer.render(&view), "xxx\nx^x\nxxx");
}
