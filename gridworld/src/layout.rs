use multiagent_minimax::Position;
use thiserror::Error;

use crate::grid::Grid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,
    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell {cell:?} at row {row}, column {column}")]
    UnknownCell { row: usize, column: usize, cell: char },
    #[error("layout has no pacman (`P`)")]
    NoAgentZero,
    #[error("layout has more than one pacman (`P`)")]
    MultipleAgentZero,
}

/// The static contents of a layout file, before any agent has moved
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) walls: Grid<bool>,
    pub(crate) food: Grid<bool>,
    pub(crate) capsules: Vec<Position>,
    pub(crate) pacman: Position,
    pub(crate) ghosts: Vec<Position>,
}

/// Parses the classic text layout format
///
/// `%` wall, `.` food, `o` capsule, `P` pacman, `G` ghost, space empty. The first line of text
/// is the top row of the board. Ghosts take their agent index in reading order.
pub(crate) fn parse_layout(text: &str) -> Result<Layout, LayoutError> {
    let mut rows: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.trim_end_matches('\r').chars().collect())
        .collect();

    while rows.last().map_or(false, |row| row.is_empty()) {
        rows.pop();
    }
    while rows.first().map_or(false, |row| row.is_empty()) {
        rows.remove(0);
    }

    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());
    if width == 0 {
        return Err(LayoutError::Empty);
    }

    let mut walls = Grid::new(width, height, false);
    let mut food = Grid::new(width, height, false);
    let mut capsules = vec![];
    let mut pacman = None;
    let mut ghosts = vec![];

    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != width {
            return Err(LayoutError::Ragged {
                row,
                expected: width,
                found: cells.len(),
            });
        }

        let y = (height - 1 - row) as i32;
        for (column, cell) in cells.iter().enumerate() {
            let position = Position::new(column as i32, y);

            match cell {
                '%' => {
                    walls.set(position, true);
                }
                '.' => {
                    food.set(position, true);
                }
                'o' => capsules.push(position),
                'P' => {
                    if pacman.replace(position).is_some() {
                        return Err(LayoutError::MultipleAgentZero);
                    }
                }
                'G' => ghosts.push(position),
                ' ' => {}
                other => {
                    return Err(LayoutError::UnknownCell {
                        row,
                        column,
                        cell: *other,
                    })
                }
            }
        }
    }

    Ok(Layout {
        walls,
        food,
        capsules,
        pacman: pacman.ok_or(LayoutError::NoAgentZero)?,
        ghosts,
    })
}
