use common::bitboard::{Bitboard, Square};

/// The eight compass directions a sliding piece can travel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North = 0,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ROOK: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const BISHOP: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    fn offset(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }

    /// Whether travel in this direction moves towards higher square indices.
    /// Decides which blocker on a ray is the nearest one.
    pub fn is_ascending(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }
}

/// Precomputed rays from every square in every direction, excluding the
/// origin square and extending to the board edge.
pub struct RayTable {
    rays: [[Bitboard; 64]; 8],
}

impl RayTable {
    pub fn new() -> Self {
        let mut rays = [[Bitboard::EMPTY; 64]; 8];
        for &dir in &Direction::ALL {
            for square in Square::iter() {
                rays[dir as usize][square.index()] = generate_ray(square, dir);
            }
        }
        Self { rays }
    }

    pub fn get(&self, square: Square, dir: Direction) -> Bitboard {
        self.rays[dir as usize][square.index()]
    }
}

fn generate_ray(square: Square, dir: Direction) -> Bitboard {
    let (rank_step, file_step) = dir.offset();
    let mut ray = Bitboard::EMPTY;
    let mut rank = square.rank() as i8 + rank_step;
    let mut file = square.file() as i8 + file_step;
    while (0..8).contains(&rank) && (0..8).contains(&file) {
        ray |= Square::from_rank_file(rank as u8, file as u8).to_bitboard();
        rank += rank_step;
        file += file_step;
    }
    ray
}
