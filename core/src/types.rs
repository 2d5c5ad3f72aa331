use std::fmt;

/// A move available to an agent on its turn.
/// `Stop` is the no-op; adversaries are never allowed to take it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// The four moving directions, in the order legal actions are generated.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Returns the opposite direction. `Stop` reverses to itself.
    pub const fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }

    /// Returns the (dx, dy) offset. Rows grow downward, so North is -y.
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    /// Parses a direction from its display name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "north" | "n" => Some(Direction::North),
            "south" | "s" => Some(Direction::South),
            "east" | "e" => Some(Direction::East),
            "west" | "w" => Some(Direction::West),
            "stop" => Some(Direction::Stop),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        };
        write!(f, "{name}")
    }
}

/// A cell on the layout grid.
/// `x` is the column, `y` the row counted from the top of the layout text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates Manhattan distance to another position.
    pub const fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the neighbouring position in the given direction.
    /// Bounds and walls are the caller's concern.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position and heading of the controlled agent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AgentState {
    pub position: Position,
    pub direction: Direction,
}

impl AgentState {
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            direction: Direction::Stop,
        }
    }
}

/// An adversarial agent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct GhostState {
    /// Respawn cell after being eaten while harmless
    pub start: Position,
    pub position: Position,
    pub direction: Direction,
    /// Remaining moves during which the ghost is harmless
    pub scared_timer: u32,
}

impl GhostState {
    pub const fn new(start: Position) -> Self {
        Self {
            start,
            position: start,
            direction: Direction::Stop,
            scared_timer: 0,
        }
    }

    /// Returns true while touching this ghost is safe for the controlled agent.
    pub const fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}
