//! Operation and mode letters of the command language.

use std::fmt;

/// What a command acts on. The first letter of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `C`: move the 3D cursor.
    Cursor,
    /// `P`: move the pivot point.
    Pivot,
    /// `G`: grab (move) selected vertices or objects.
    Grab,
    /// `N`: add a new vertex.
    NewVertex,
    /// `V`: extrude a new vertex from the active one.
    ExtrudeVertex,
    /// `S`: split selected edges.
    Split,
    /// `D`: duplicate selected geometry.
    Duplicate,
    /// `E`: extrude selected geometry.
    ExtrudeGeometry,
    /// `F`: fillet vertices or edges.
    Fillet,
    /// `M`: evaluate a maths expression into a register.
    Maths,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Self::Cursor,
        Self::Pivot,
        Self::Grab,
        Self::NewVertex,
        Self::ExtrudeVertex,
        Self::Split,
        Self::Duplicate,
        Self::ExtrudeGeometry,
        Self::Fillet,
        Self::Maths,
    ];

    /// Parses an operation letter (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter.to_ascii_uppercase() {
            'C' => Self::Cursor,
            'P' => Self::Pivot,
            'G' => Self::Grab,
            'N' => Self::NewVertex,
            'V' => Self::ExtrudeVertex,
            'S' => Self::Split,
            'D' => Self::Duplicate,
            'E' => Self::ExtrudeGeometry,
            'F' => Self::Fillet,
            'M' => Self::Maths,
            _ => return None,
        })
    }

    /// Returns the upper-case letter for this operation.
    pub fn letter(self) -> char {
        match self {
            Self::Cursor => 'C',
            Self::Pivot => 'P',
            Self::Grab => 'G',
            Self::NewVertex => 'N',
            Self::ExtrudeVertex => 'V',
            Self::Split => 'S',
            Self::Duplicate => 'D',
            Self::ExtrudeGeometry => 'E',
            Self::Fillet => 'F',
            Self::Maths => 'M',
        }
    }

    /// Coordinate modes accepted by this operation.
    ///
    /// Empty for operations that take their own mode letters (fillet, maths).
    pub fn coordinate_modes(self) -> &'static [Mode] {
        match self {
            Self::Cursor
            | Self::Pivot
            | Self::Grab
            | Self::NewVertex
            | Self::ExtrudeVertex
            | Self::Split => &[Mode::Absolute, Mode::Delta, Mode::Direction, Mode::Percent],
            Self::Duplicate | Self::ExtrudeGeometry => &[Mode::Delta, Mode::Direction],
            Self::Fillet | Self::Maths => &[],
        }
    }

    /// Returns whether this operation edits mesh data and so needs edit mode.
    pub fn needs_edit_mode(self) -> bool {
        matches!(
            self,
            Self::NewVertex
                | Self::ExtrudeVertex
                | Self::Split
                | Self::Duplicate
                | Self::ExtrudeGeometry
                | Self::Fillet
        )
    }

    /// Returns whether this operation can be the target of a placement
    /// command (`CINT`, `GCEN`, `VNML`, ...).
    pub fn is_placement_target(self) -> bool {
        matches!(
            self,
            Self::Cursor | Self::Pivot | Self::Grab | Self::NewVertex | Self::ExtrudeVertex
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cursor => "cursor",
            Self::Pivot => "pivot",
            Self::Grab => "grab",
            Self::NewVertex => "new vertex",
            Self::ExtrudeVertex => "extrude vertex",
            Self::Split => "split",
            Self::Duplicate => "duplicate",
            Self::ExtrudeGeometry => "extrude geometry",
            Self::Fillet => "fillet",
            Self::Maths => "maths",
        };
        f.write_str(name)
    }
}

/// How the typed values are turned into a point. The second letter of a
/// coordinate command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `A`: three absolute coordinates.
    Absolute,
    /// `D`: three relative coordinates.
    Delta,
    /// `I`: distance and angle in the working plane.
    Direction,
    /// `P`: percentage between two selected points.
    Percent,
}

impl Mode {
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter.to_ascii_uppercase() {
            'A' => Self::Absolute,
            'D' => Self::Delta,
            'I' => Self::Direction,
            'P' => Self::Percent,
            _ => return None,
        })
    }

    pub fn letter(self) -> char {
        match self {
            Self::Absolute => 'A',
            Self::Delta => 'D',
            Self::Direction => 'I',
            Self::Percent => 'P',
        }
    }

    /// Number of comma-separated values this mode takes.
    pub fn value_count(self) -> usize {
        match self {
            Self::Absolute | Self::Delta => 3,
            Self::Direction => 2,
            Self::Percent => 1,
        }
    }
}

/// What a fillet rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilletMode {
    /// `V`: selected vertices only.
    Vertex,
    /// `E`: selected edges.
    Edge,
    /// `I`: the corner where two selected edges would meet.
    Intersect,
}

impl FilletMode {
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter.to_ascii_uppercase() {
            'V' => Self::Vertex,
            'E' => Self::Edge,
            'I' => Self::Intersect,
            _ => return None,
        })
    }

    /// Radius, segments and profile.
    pub const VALUE_COUNT: usize = 3;
}

/// Register that receives the result of a maths command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathsTarget {
    X,
    Y,
    Z,
    Distance,
    Angle,
    Percent,
    Output,
}

impl MathsTarget {
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter.to_ascii_uppercase() {
            'X' => Self::X,
            'Y' => Self::Y,
            'Z' => Self::Z,
            'D' => Self::Distance,
            'A' => Self::Angle,
            'P' => Self::Percent,
            'O' => Self::Output,
            _ => return None,
        })
    }
}

/// Geometric construction used by a placement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    /// `INT`: intersection of two lines in the working plane.
    Intersect,
    /// `CEN`: centre of the arc through three points.
    ArcCentre,
    /// `NML`: perpendicular foot of a point on a line.
    Normal,
}

impl PlacementKind {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "INT" => Some(Self::Intersect),
            "CEN" => Some(Self::ArcCentre),
            "NML" => Some(Self::Normal),
            _ => None,
        }
    }
}
