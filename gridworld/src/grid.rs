use multiagent_minimax::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A dense width x height grid. `(0, 0)` is the bottom left cell
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;

        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.index(position).map(|i| &self.cells[i])
    }

    /// Returns false when the position is off the grid
    pub fn set(&mut self, position: Position, value: T) -> bool {
        match self.index(position) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Every position on the grid, row by row from the bottom
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }
}

impl Grid<bool> {
    /// Off-grid positions count as unset
    pub fn is_set(&self, position: Position) -> bool {
        self.get(position).copied().unwrap_or(false)
    }

    pub fn set_positions(&self) -> Vec<Position> {
        self.positions().filter(|p| self.is_set(*p)).collect()
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|set| **set).count()
    }
}
