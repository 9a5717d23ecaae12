use gridbot::{Grid, Robot};

/// Plus-shaped 3x3 interior: barriers in the four corners
pub const PLUS_INTERIOR: [[u8; 3]; 3] = [[1, 0, 1], [0, 0, 0], [1, 0, 1]];

pub fn plus_grid() -> Grid {
    Grid::new(&PLUS_INTERIOR).expect("plus interior is valid")
}

/// Robot with the given radius placed in the plus grid
pub fn placed_robot(radius: i32) -> Robot {
    let mut robot = Robot::new(radius);
    robot.place_in_grid(plus_grid()).expect("plus grid has open cells");
    robot
}

/// Unique file path under the system temp directory
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("gridbot-{}-{}", std::process::id(), name))
}
